//! Checked-patient set for bulk operations.
//!
//! The selection is independent of the current filter: the "all visible"
//! operations only touch ids in the visible slice, so ids hidden by a
//! narrower filter keep their state.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientSelection {
    selected: BTreeSet<String>,
}

impl PatientSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Flip membership of one id.
    pub fn toggle(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    pub fn select_all_visible(&mut self, visible: &[String]) {
        self.selected.extend(visible.iter().cloned());
    }

    pub fn deselect_all_visible(&mut self, visible: &[String]) {
        for id in visible {
            self.selected.remove(id);
        }
    }

    /// False for an empty visible slice.
    pub fn all_visible_selected(&self, visible: &[String]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.selected.contains(id))
    }

    /// Header-checkbox behaviour: clear the visible ids when all of them are
    /// selected, otherwise select them all.
    pub fn toggle_all_visible(&mut self, visible: &[String]) {
        if self.all_visible_selected(visible) {
            self.deselect_all_visible(visible);
        } else {
            self.select_all_visible(visible);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected ids in ascending order, ready for a bulk delete.
    pub fn ids(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn toggle_flips_membership() {
        let mut sel = PatientSelection::new();
        sel.toggle("pat-1");
        assert!(sel.is_selected("pat-1"));
        sel.toggle("pat-1");
        assert!(!sel.is_selected("pat-1"));
        assert!(sel.is_empty());
    }

    #[test]
    fn selection_survives_filter_narrowing() {
        let mut sel = PatientSelection::new();
        let wide = visible(&["pat-a", "pat-b"]);
        let narrow = visible(&["pat-b"]);

        sel.toggle("pat-a");
        assert!(!sel.all_visible_selected(&narrow));
        sel.select_all_visible(&narrow);
        sel.deselect_all_visible(&narrow);

        assert!(sel.is_selected("pat-a"));
        assert!(!sel.all_visible_selected(&wide));
        assert_eq!(sel.ids(), vec!["pat-a"]);
    }

    #[test]
    fn select_all_visible_leaves_hidden_ids_alone() {
        let mut sel = PatientSelection::new();
        sel.toggle("pat-hidden");
        sel.select_all_visible(&visible(&["pat-1", "pat-2"]));
        assert_eq!(sel.len(), 3);

        sel.deselect_all_visible(&visible(&["pat-1", "pat-2"]));
        assert_eq!(sel.ids(), vec!["pat-hidden"]);
    }

    #[test]
    fn empty_view_is_never_all_selected() {
        let mut sel = PatientSelection::new();
        sel.toggle("pat-1");
        assert!(!sel.all_visible_selected(&[]));
    }

    #[test]
    fn toggle_all_visible_follows_header_checkbox() {
        let mut sel = PatientSelection::new();
        let view = visible(&["pat-1", "pat-2"]);
        sel.toggle("pat-1");

        sel.toggle_all_visible(&view);
        assert!(sel.all_visible_selected(&view));

        sel.toggle_all_visible(&view);
        assert!(sel.is_empty());
    }

    #[test]
    fn clear_after_bulk_delete() {
        let mut sel = PatientSelection::new();
        sel.select_all_visible(&visible(&["pat-2", "pat-1"]));
        assert_eq!(sel.ids(), vec!["pat-1", "pat-2"]);
        sel.clear();
        assert!(sel.is_empty());
    }
}
