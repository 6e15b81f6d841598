// Group navigator: flat image catalog -> fixed-size groups.
//
// Groups are 1-based everywhere (1..=N); slots are 0-based within a
// group. Group and slot stay independent until resolve() combines
// them, so auto-advance on a completed group and explicit next/prev
// presses both only ever move current_group by +-1 mod N.
//
// Session memory holds the (index, image) pairs shown since the last
// completed cycle, in display order. It never exceeds group_size and
// is cleared exactly when it reaches group_size.

use alloc::vec::Vec;
use core::fmt;

use crate::catalog::CatalogTable;
use crate::error::ConfigurationError;

pub struct GroupNavigator<T> {
    catalog: Vec<T>,
    group_size: usize,
    group_count: usize,
    current_group: usize,
    shown: Vec<(usize, T)>,
    last_shown: Option<T>,
}

impl<T: Clone + PartialEq> GroupNavigator<T> {
    /// Fails unless `catalog` is non-empty and splits evenly into groups
    /// of `group_size`. Starts at group 1 with empty session memory.
    pub fn build(catalog: Vec<T>, group_size: usize) -> Result<Self, ConfigurationError> {
        if group_size == 0 {
            return Err(ConfigurationError::ZeroGroupSize);
        }
        if catalog.is_empty() {
            return Err(ConfigurationError::EmptyCatalog);
        }
        if catalog.len() % group_size != 0 {
            return Err(ConfigurationError::NotMultipleOfGroupSize {
                len: catalog.len(),
                group_size,
            });
        }

        let group_count = catalog.len() / group_size;
        Ok(Self {
            catalog,
            group_size,
            group_count,
            current_group: 1,
            shown: Vec::with_capacity(group_size),
            last_shown: None,
        })
    }

    /// Next group, wrapping N -> 1. Returns the new group.
    pub fn advance_group(&mut self) -> usize {
        self.current_group = self.current_group % self.group_count + 1;
        self.current_group
    }

    /// Previous group, wrapping 1 -> N. Returns the new group.
    pub fn retreat_group(&mut self) -> usize {
        self.current_group = if self.current_group <= 1 {
            self.group_count
        } else {
            self.current_group - 1
        };
        self.current_group
    }

    /// Catalog index and image addressed by `slot` in the current group.
    ///
    /// `None` only for `slot >= group_size`; the button row may be wider
    /// than a configured group.
    pub fn resolve(&self, slot: usize) -> Option<(usize, &T)> {
        if slot >= self.group_size {
            return None;
        }
        let index = (self.current_group - 1) * self.group_size + slot;
        self.catalog.get(index).map(|image| (index, image))
    }

    /// Note a successfully displayed image.
    ///
    /// Re-recording an index already in session memory only refreshes
    /// the last-shown image. When the memory fills up it is handed back
    /// as a [`GroupReport`], cleared, and the navigator advances.
    pub fn record_shown(&mut self, index: usize, image: T) -> Option<GroupReport<T>> {
        if !self.shown.iter().any(|(i, _)| *i == index) {
            self.shown.push((index, image.clone()));
        }
        self.last_shown = Some(image);

        if self.shown.len() < self.group_size {
            return None;
        }

        let group = self.current_group;
        let entries = core::mem::replace(&mut self.shown, Vec::with_capacity(self.group_size));
        let next_group = self.advance_group();

        Some(GroupReport {
            group,
            entries,
            next_group,
            wrapped: next_group == 1,
        })
    }

    /// True if `image` is what the panel currently shows.
    pub fn is_same_as_last(&self, image: &T) -> bool {
        self.last_shown.as_ref() == Some(image)
    }

    pub fn current_group(&self) -> usize {
        self.current_group
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    pub fn catalog(&self) -> &[T] {
        &self.catalog
    }

    /// Boot listing; only reachable once the catalog has passed `build`.
    pub fn catalog_table(&self) -> CatalogTable<'_, T>
    where
        T: AsRef<str>,
    {
        CatalogTable::new(&self.catalog, self.group_size)
    }

    pub fn session_len(&self) -> usize {
        self.shown.len()
    }

    pub fn last_shown(&self) -> Option<&T> {
        self.last_shown.as_ref()
    }
}

/// Emitted once every image of a cycle has been displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupReport<T> {
    /// Group that was active when the cycle completed.
    pub group: usize,
    /// (catalog index, image) in display order.
    pub entries: Vec<(usize, T)>,
    /// Group the navigator moved on to.
    pub next_group: usize,
    /// The advance went past the last group back to group 1.
    pub wrapped: bool,
}

impl<T: fmt::Display> fmt::Display for GroupReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group {} images shown:", self.group)?;
        for (index, image) in &self.entries {
            write!(f, "\n{:3} {}", index + 1, image)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use proptest::prelude::*;

    fn letters() -> Vec<char> {
        vec!['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j']
    }

    #[test]
    fn build_rejects_empty_catalog() {
        let err = GroupNavigator::<char>::build(Vec::new(), 5).err();
        assert_eq!(err, Some(ConfigurationError::EmptyCatalog));
    }

    #[test]
    fn build_rejects_incomplete_last_group() {
        let err = GroupNavigator::build(vec!['a'; 7], 5).err();
        assert_eq!(
            err,
            Some(ConfigurationError::NotMultipleOfGroupSize {
                len: 7,
                group_size: 5
            })
        );
    }

    #[test]
    fn catalog_table_lists_only_whole_groups() {
        let names = vec![
            "A.JPG", "B.JPG", "C.JPG", "D.JPG", "E.JPG", "F.JPG", "G.JPG", "H.JPG", "I.JPG",
            "J.JPG",
        ];
        let nav = GroupNavigator::build(names, 5).unwrap();
        let table = nav.catalog_table().to_string();
        let rows: Vec<&str> = table.lines().filter(|l| l.starts_with("| ")).skip(1).collect();
        assert_eq!(rows.len(), 10);
        assert!(rows[4].starts_with("|  1  |   5 | E "));
        assert!(rows[5].starts_with("|  2  |   6 | F "));
        assert!(rows[9].starts_with("|  2  |  10 | J "));
    }

    #[test]
    fn build_rejects_zero_group_size() {
        let err = GroupNavigator::build(letters(), 0).err();
        assert_eq!(err, Some(ConfigurationError::ZeroGroupSize));
    }

    #[test]
    fn resolves_slots_of_first_group() {
        let nav = GroupNavigator::build(letters(), 5).unwrap();
        assert_eq!(nav.group_count(), 2);
        assert_eq!(nav.current_group(), 1);
        assert_eq!(nav.resolve(0), Some((0, &'a')));
        assert_eq!(nav.resolve(4), Some((4, &'e')));
        assert_eq!(nav.resolve(5), None);
    }

    #[test]
    fn full_cycle_advances_and_clears_memory() {
        let mut nav = GroupNavigator::build(letters(), 5).unwrap();

        for slot in 0..4 {
            let (index, image) = nav.resolve(slot).map(|(i, c)| (i, *c)).unwrap();
            assert!(nav.record_shown(index, image).is_none());
        }
        assert_eq!(nav.session_len(), 4);

        let (index, image) = nav.resolve(4).map(|(i, c)| (i, *c)).unwrap();
        let report = nav.record_shown(index, image).unwrap();

        assert_eq!(report.group, 1);
        assert_eq!(report.next_group, 2);
        assert!(!report.wrapped);
        assert_eq!(report.entries.len(), 5);
        assert_eq!(nav.session_len(), 0);
        assert_eq!(nav.current_group(), 2);
        assert_eq!(nav.resolve(0), Some((5, &'f')));
    }

    #[test]
    fn completing_last_group_wraps_to_first() {
        let mut nav = GroupNavigator::build(letters(), 5).unwrap();
        nav.advance_group();
        let mut last = None;
        for slot in 0..5 {
            let (index, image) = nav.resolve(slot).map(|(i, c)| (i, *c)).unwrap();
            last = nav.record_shown(index, image);
        }
        let report = last.unwrap();
        assert_eq!(report.group, 2);
        assert!(report.wrapped);
        assert_eq!(nav.current_group(), 1);
    }

    #[test]
    fn retreat_from_first_group_wraps_to_last() {
        let mut nav = GroupNavigator::build(letters(), 5).unwrap();
        assert_eq!(nav.retreat_group(), 2);
        assert_eq!(nav.resolve(0), Some((5, &'f')));
    }

    #[test]
    fn duplicate_press_is_detected_and_not_counted_twice() {
        let mut nav = GroupNavigator::build(letters(), 5).unwrap();
        let (index, image) = nav.resolve(2).map(|(i, c)| (i, *c)).unwrap();
        assert!(!nav.is_same_as_last(&image));
        nav.record_shown(index, image);

        let (index, image) = nav.resolve(2).map(|(i, c)| (i, *c)).unwrap();
        assert!(nav.is_same_as_last(&image));
        nav.record_shown(index, image);
        assert_eq!(nav.session_len(), 1);
    }

    #[test]
    fn group_change_keeps_session_memory() {
        let mut nav = GroupNavigator::build(letters(), 5).unwrap();
        nav.record_shown(0, 'a');
        nav.advance_group();
        nav.retreat_group();
        assert_eq!(nav.session_len(), 1);
        assert_eq!(nav.last_shown(), Some(&'a'));
    }

    #[test]
    fn report_lists_one_based_indices() {
        let report = GroupReport {
            group: 2,
            entries: vec![(5, "MSFS1.JPG"), (6, "MSFS2.JPG")],
            next_group: 1,
            wrapped: true,
        };
        assert_eq!(
            report.to_string(),
            "Group 2 images shown:\n  6 MSFS1.JPG\n  7 MSFS2.JPG"
        );
    }

    fn catalog_and_group_size() -> impl Strategy<Value = (Vec<u16>, usize)> {
        (1usize..8, 1usize..12).prop_map(|(group_size, groups)| {
            let catalog: Vec<u16> = (0..(group_size * groups) as u16).collect();
            (catalog, group_size)
        })
    }

    proptest! {
        #[test]
        fn build_accepts_exact_multiples((catalog, group_size) in catalog_and_group_size()) {
            let len = catalog.len();
            let nav = GroupNavigator::build(catalog, group_size).unwrap();
            prop_assert_eq!(nav.group_count(), len / group_size);
        }

        #[test]
        fn build_rejects_non_multiples(group_size in 2usize..8, len in 1usize..60) {
            prop_assume!(len % group_size != 0);
            let catalog: Vec<u16> = (0..len as u16).collect();
            prop_assert!(GroupNavigator::build(catalog, group_size).is_err());
        }

        #[test]
        fn advancing_n_times_is_identity(
            (catalog, group_size) in catalog_and_group_size(),
            start in 0usize..12,
        ) {
            let mut nav = GroupNavigator::build(catalog, group_size).unwrap();
            for _ in 0..start % nav.group_count() {
                nav.advance_group();
            }
            let before = nav.current_group();
            for _ in 0..nav.group_count() {
                nav.advance_group();
            }
            prop_assert_eq!(nav.current_group(), before);
        }

        #[test]
        fn retreat_undoes_advance(
            (catalog, group_size) in catalog_and_group_size(),
            start in 0usize..12,
        ) {
            let mut nav = GroupNavigator::build(catalog, group_size).unwrap();
            for _ in 0..start % nav.group_count() {
                nav.advance_group();
            }
            let before = nav.current_group();
            nav.advance_group();
            nav.retreat_group();
            prop_assert_eq!(nav.current_group(), before);
            nav.retreat_group();
            nav.advance_group();
            prop_assert_eq!(nav.current_group(), before);
        }

        #[test]
        fn resolve_is_deterministic(
            (catalog, group_size) in catalog_and_group_size(),
            slot in 0usize..8,
        ) {
            let nav = GroupNavigator::build(catalog, group_size).unwrap();
            prop_assert_eq!(nav.resolve(slot), nav.resolve(slot));
            if slot < group_size {
                prop_assert_eq!(nav.resolve(slot).map(|(i, _)| i), Some(slot));
            }
        }

        #[test]
        fn full_cycle_clears_and_advances_once(
            (catalog, group_size) in catalog_and_group_size(),
            start in 0usize..12,
        ) {
            let mut nav = GroupNavigator::build(catalog, group_size).unwrap();
            for _ in 0..start % nav.group_count() {
                nav.advance_group();
            }
            let before = nav.current_group();
            let mut reports = 0;
            for slot in 0..group_size {
                let (index, image) = nav.resolve(slot).map(|(i, v)| (i, *v)).unwrap();
                if nav.record_shown(index, image).is_some() {
                    reports += 1;
                }
                prop_assert!(nav.session_len() < group_size);
            }
            prop_assert_eq!(reports, 1);
            prop_assert_eq!(nav.session_len(), 0);
            prop_assert_eq!(nav.current_group(), before % nav.group_count() + 1);
        }
    }
}
