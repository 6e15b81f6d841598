use core::fmt;

/// Rejected catalog shape at navigator build time.
///
/// Fatal at boot: the firmware shows the message on the panel and halts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No images were found.
    EmptyCatalog,
    /// A group must hold at least one image.
    ZeroGroupSize,
    /// The last group would be incomplete.
    NotMultipleOfGroupSize { len: usize, group_size: usize },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatalog => f.write_str("no image files found"),
            Self::ZeroGroupSize => f.write_str("group size must be at least 1"),
            Self::NotMultipleOfGroupSize { len, group_size } => write!(
                f,
                "{} image files; please make it a multiple of {}",
                len, group_size
            ),
        }
    }
}
