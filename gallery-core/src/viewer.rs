// Event handling on top of the navigator.
//
// A front-button press ends in exactly one Outcome. The renderer is
// only reached for a resolvable slot whose image differs from what is
// on the panel, and the navigator only learns about images the
// renderer reports as displayed.

use core::fmt;

use log::{info, warn};

use crate::input::GroupStep;
use crate::navigator::{GroupNavigator, GroupReport};

/// Puts one catalog image on the panel.
pub trait ImageRenderer<T> {
    type Error: fmt::Display;

    fn render(&mut self, index: usize, image: &T) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// Slot is outside the configured group.
    NoImage,
    /// Image is already on the panel; nothing was rendered.
    Duplicate,
    /// Renderer failed; navigator state unchanged.
    Failed,
    Shown {
        index: usize,
        report: Option<GroupReport<T>>,
    },
}

pub struct Viewer<T> {
    nav: GroupNavigator<T>,
    // set after the first duplicate of a run has been logged
    duplicate_logged: bool,
}

impl<T: Clone + PartialEq + fmt::Display> Viewer<T> {
    pub fn new(nav: GroupNavigator<T>) -> Self {
        Self {
            nav,
            duplicate_logged: false,
        }
    }

    pub fn on_slot<R>(&mut self, slot: usize, renderer: &mut R) -> Outcome<T>
    where
        R: ImageRenderer<T>,
    {
        let Some((index, image)) = self.nav.resolve(slot) else {
            return Outcome::NoImage;
        };

        if self.nav.is_same_as_last(image) {
            if !self.duplicate_logged {
                info!("Image {} already displayed", image);
                self.duplicate_logged = true;
            }
            return Outcome::Duplicate;
        }

        let image = image.clone();
        info!(
            "group {} slot {}: image {} {}",
            self.nav.current_group(),
            slot,
            index + 1,
            image
        );
        if let Err(e) = renderer.render(index, &image) {
            warn!("render {} failed: {}", image, e);
            return Outcome::Failed;
        }

        self.duplicate_logged = false;
        let report = self.nav.record_shown(index, image);
        if let Some(r) = &report {
            info!("{}", r);
            if r.wrapped {
                info!("All images have been displayed. Continuing with the first group.");
            } else {
                info!("Continuing with group {}.", r.next_group);
            }
        }
        Outcome::Shown { index, report }
    }

    pub fn on_group_step(&mut self, step: GroupStep) -> usize {
        let group = match step {
            GroupStep::Next => self.nav.advance_group(),
            GroupStep::Prev => self.nav.retreat_group(),
        };
        self.duplicate_logged = false;
        info!("group {} ({}/{})", step.name(), group, self.nav.group_count());
        group
    }

    pub fn navigator(&self) -> &GroupNavigator<T> {
        &self.nav
    }

    #[cfg(test)]
    fn duplicate_logged(&self) -> bool {
        self.duplicate_logged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Panel {
        drawn: Vec<(usize, char)>,
        fail: bool,
    }

    impl ImageRenderer<char> for Panel {
        type Error = &'static str;

        fn render(&mut self, index: usize, image: &char) -> Result<(), Self::Error> {
            if self.fail {
                return Err("decode error");
            }
            self.drawn.push((index, *image));
            Ok(())
        }
    }

    fn viewer() -> Viewer<char> {
        let catalog = vec!['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j'];
        Viewer::new(GroupNavigator::build(catalog, 5).unwrap())
    }

    #[test]
    fn shows_resolved_image() {
        let mut v = viewer();
        let mut panel = Panel::default();
        let out = v.on_slot(1, &mut panel);
        assert_eq!(
            out,
            Outcome::Shown {
                index: 1,
                report: None
            }
        );
        assert_eq!(panel.drawn, [(1, 'b')]);
        assert_eq!(v.navigator().last_shown(), Some(&'b'));
    }

    #[test]
    fn out_of_range_slot_is_no_image() {
        let mut v = viewer();
        let mut panel = Panel::default();
        assert_eq!(v.on_slot(5, &mut panel), Outcome::NoImage);
        assert!(panel.drawn.is_empty());
    }

    #[test]
    fn duplicate_skips_renderer() {
        let mut v = viewer();
        let mut panel = Panel::default();
        v.on_slot(3, &mut panel);
        assert_eq!(v.on_slot(3, &mut panel), Outcome::Duplicate);
        assert_eq!(v.on_slot(3, &mut panel), Outcome::Duplicate);
        assert_eq!(panel.drawn.len(), 1);
        assert_eq!(v.navigator().session_len(), 1);
    }

    #[test]
    fn duplicate_notice_once_per_run() {
        let mut v = viewer();
        let mut panel = Panel::default();
        v.on_slot(3, &mut panel);
        assert!(!v.duplicate_logged());

        assert_eq!(v.on_slot(3, &mut panel), Outcome::Duplicate);
        assert!(v.duplicate_logged());
        // further repeats stay quiet
        assert_eq!(v.on_slot(3, &mut panel), Outcome::Duplicate);
        assert!(v.duplicate_logged());
    }

    #[test]
    fn successful_render_rearms_duplicate_notice() {
        let mut v = viewer();
        let mut panel = Panel::default();
        v.on_slot(3, &mut panel);
        v.on_slot(3, &mut panel);
        assert!(v.duplicate_logged());

        assert!(matches!(v.on_slot(1, &mut panel), Outcome::Shown { .. }));
        assert!(!v.duplicate_logged());
        assert_eq!(v.on_slot(1, &mut panel), Outcome::Duplicate);
        assert!(v.duplicate_logged());
    }

    #[test]
    fn group_step_rearms_duplicate_notice() {
        let mut v = viewer();
        let mut panel = Panel::default();
        v.on_slot(0, &mut panel);
        v.on_slot(0, &mut panel);
        assert!(v.duplicate_logged());

        v.on_group_step(GroupStep::Next);
        assert!(!v.duplicate_logged());
    }

    #[test]
    fn failed_render_keeps_duplicate_notice_state() {
        let mut v = viewer();
        let mut panel = Panel::default();
        v.on_slot(0, &mut panel);
        v.on_slot(0, &mut panel);
        panel.fail = true;
        assert_eq!(v.on_slot(2, &mut panel), Outcome::Failed);
        assert!(v.duplicate_logged());
    }

    #[test]
    fn failed_render_leaves_state_untouched() {
        let mut v = viewer();
        let mut panel = Panel {
            fail: true,
            ..Panel::default()
        };
        assert_eq!(v.on_slot(0, &mut panel), Outcome::Failed);
        assert_eq!(v.navigator().session_len(), 0);
        assert_eq!(v.navigator().last_shown(), None);

        // the same press renders once the panel recovers
        panel.fail = false;
        assert!(matches!(v.on_slot(0, &mut panel), Outcome::Shown { .. }));
    }

    #[test]
    fn fifth_distinct_image_reports_and_advances() {
        let mut v = viewer();
        let mut panel = Panel::default();
        for slot in [4, 0, 2, 1] {
            assert!(matches!(
                v.on_slot(slot, &mut panel),
                Outcome::Shown { report: None, .. }
            ));
        }
        let Outcome::Shown {
            index,
            report: Some(report),
        } = v.on_slot(3, &mut panel)
        else {
            panic!("group should have completed");
        };
        assert_eq!(index, 3);
        assert_eq!(report.group, 1);
        let order: Vec<usize> = report.entries.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, [4, 0, 2, 1, 3]);
        assert_eq!(v.navigator().current_group(), 2);
    }

    #[test]
    fn group_steps_wrap_both_ways() {
        let mut v = viewer();
        assert_eq!(v.on_group_step(GroupStep::Prev), 2);
        assert_eq!(v.on_group_step(GroupStep::Next), 1);
        assert_eq!(v.on_group_step(GroupStep::Next), 2);
        assert_eq!(v.on_group_step(GroupStep::Next), 1);
    }

    #[test]
    fn last_image_of_previous_group_is_not_a_duplicate_elsewhere() {
        let mut v = viewer();
        let mut panel = Panel::default();
        v.on_slot(0, &mut panel);
        v.on_group_step(GroupStep::Next);
        assert!(matches!(
            v.on_slot(0, &mut panel),
            Outcome::Shown { index: 5, .. }
        ));
    }
}
