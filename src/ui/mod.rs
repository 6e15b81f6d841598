// Full-screen layouts for the 1-bit landscape panel.
// Drawn through the strip buffer, so every layout must paint the same
// pixels each time it is called.

mod catalog;
mod message;

pub use catalog::CatalogScreen;
pub use message::MessageScreen;
