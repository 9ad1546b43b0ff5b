use tracing::debug;

use crate::settings::FilterSettings;

/// One recorded edit: the settings after the edit and a readable label.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub settings: FilterSettings,
    pub label: String,
}

/// A row in the history panel.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryRow {
    pub index: usize,
    /// `"<n>. <label>"`, numbered from 1.
    pub text: String,
    pub active: bool,
}

/// Linear undo/redo log of settings snapshots.
///
/// The cursor is `None` exactly when the log is empty. Pushing while the
/// cursor is behind the newest entry discards everything after the cursor.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, settings: FilterSettings, label: impl Into<String>) {
        let keep = self.cursor.map_or(0, |c| c + 1);
        if keep < self.entries.len() {
            debug!(discarded = self.entries.len() - keep, "dropping redo branch");
            self.entries.truncate(keep);
        }
        let label = label.into();
        debug!(%label, index = self.entries.len(), "history push");
        self.entries.push(HistoryEntry { settings, label });
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Move the cursor to `index` and return the snapshot stored there.
    /// Out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) -> Option<FilterSettings> {
        let entry = self.entries.get(index)?;
        self.cursor = Some(index);
        Some(entry.settings)
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.entries.len())
    }

    pub fn undo(&mut self) -> Option<FilterSettings> {
        if !self.can_undo() {
            return None;
        }
        let target = self.cursor? - 1;
        self.jump_to(target)
    }

    pub fn redo(&mut self) -> Option<FilterSettings> {
        if !self.can_redo() {
            return None;
        }
        let target = self.cursor? + 1;
        self.jump_to(target)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = HistoryRow> + '_ {
        self.entries.iter().enumerate().map(|(i, entry)| HistoryRow {
            index: i,
            text: format!("{}. {}", i + 1, entry.label),
            active: self.cursor == Some(i),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_brightness(v: i32) -> FilterSettings {
        FilterSettings {
            brightness: v,
            ..Default::default()
        }
    }

    fn abc() -> History {
        let mut h = History::new();
        h.push(with_brightness(100), "A");
        h.push(with_brightness(120), "B");
        h.push(with_brightness(140), "C");
        h
    }

    fn labels(h: &History) -> Vec<&str> {
        h.entries().iter().map(|e| e.label.as_str()).collect()
    }

    #[test]
    fn empty_history_has_no_cursor() {
        let h = History::new();
        assert!(h.is_empty());
        assert_eq!(h.cursor(), None);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
    }

    #[test]
    fn push_moves_cursor_to_end() {
        let h = abc();
        assert_eq!(h.len(), 3);
        assert_eq!(h.cursor(), Some(2));
        assert_eq!(h.entries()[2].label, "C");
    }

    #[test]
    fn push_after_undo_discards_redo_branch() {
        let mut h = abc();
        h.undo();
        h.undo();
        assert_eq!(h.cursor(), Some(0));
        h.push(with_brightness(160), "D");
        assert_eq!(labels(&h), vec!["A", "D"]);
        assert_eq!(h.cursor(), Some(1));
        assert!(!h.can_redo());
    }

    #[test]
    fn undo_redo_bounds() {
        let mut h = abc();
        assert!(!h.can_redo());
        assert_eq!(h.redo(), None);
        assert_eq!(h.cursor(), Some(2));

        assert_eq!(h.undo(), Some(with_brightness(120)));
        assert_eq!(h.undo(), Some(with_brightness(100)));
        assert!(!h.can_undo());
        assert_eq!(h.undo(), None);
        assert_eq!(h.cursor(), Some(0));

        assert_eq!(h.redo(), Some(with_brightness(120)));
        assert_eq!(h.cursor(), Some(1));
    }

    #[test]
    fn jump_is_non_destructive() {
        let mut h = abc();
        let before = h.entries().to_vec();
        assert_eq!(h.jump_to(0), Some(with_brightness(100)));
        assert_eq!(h.cursor(), Some(0));
        assert_eq!(h.entries(), before.as_slice());
        assert_eq!(h.jump_to(2), Some(with_brightness(140)));
        assert_eq!(h.entries(), before.as_slice());
    }

    #[test]
    fn jump_out_of_range_is_ignored() {
        let mut h = abc();
        h.jump_to(1);
        assert_eq!(h.jump_to(3), None);
        assert_eq!(h.jump_to(usize::MAX), None);
        assert_eq!(h.cursor(), Some(1));
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn clear_empties_log() {
        let mut h = abc();
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.cursor(), None);
        assert_eq!(h.jump_to(0), None);
    }

    #[test]
    fn snapshots_are_copies() {
        let mut h = History::new();
        let mut live = with_brightness(100);
        h.push(live, "Original");
        live.brightness = 10;
        assert_eq!(h.entries()[0].settings.brightness, 100);
    }

    #[test]
    fn rows_are_numbered_from_one() {
        let mut h = abc();
        h.jump_to(1);
        let rows: Vec<_> = h.rows().collect();
        assert_eq!(rows[0].text, "1. A");
        assert_eq!(rows[2].text, "3. C");
        assert!(!rows[0].active);
        assert!(rows[1].active);
    }
}
