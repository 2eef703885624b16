use core_model::incident::RecordId;
use serde::Serialize;
use thiserror::Error;

/// Which record the detail panel shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "id", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    NoSelection,
    Selected(RecordId),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("record {0} does not exist")]
    Unknown(RecordId),
    #[error("record {0} is hidden by the active filters")]
    NotVisible(RecordId),
}

impl Selection {
    pub fn select(&mut self, id: Option<RecordId>) {
        *self = match id {
            Some(id) => Selection::Selected(id),
            None => Selection::NoSelection,
        };
    }

    /// Clears the selection unless its id is among `visible`. Returns true
    /// when a selection was dropped.
    pub fn reconcile<'a, I>(&mut self, visible: I) -> bool
    where
        I: IntoIterator<Item = &'a RecordId>,
    {
        let Selection::Selected(current) = &*self else {
            return false;
        };
        if visible.into_iter().any(|id| id == current) {
            return false;
        }
        *self = Selection::NoSelection;
        true
    }

    pub fn id(&self) -> Option<&RecordId> {
        match self {
            Selection::Selected(id) => Some(id),
            Selection::NoSelection => None,
        }
    }

    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.id() == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<RecordId> {
        raw.iter().map(|id| RecordId::from(*id)).collect()
    }

    #[test]
    fn select_and_clear() {
        let mut selection = Selection::default();
        selection.select(Some("7".into()));
        assert_eq!(selection, Selection::Selected("7".into()));
        selection.select(None);
        assert_eq!(selection, Selection::NoSelection);
    }

    #[test]
    fn reconcile_keeps_visible_selection() {
        let mut selection = Selection::Selected("2".into());
        assert!(!selection.reconcile(&ids(&["1", "2", "3"])));
        assert!(selection.is_selected(&"2".into()));
    }

    #[test]
    fn reconcile_drops_hidden_selection() {
        let mut selection = Selection::Selected("2".into());
        assert!(selection.reconcile(&ids(&["1", "3"])));
        assert_eq!(selection.id(), None);
    }

    #[test]
    fn reconcile_without_selection_is_a_no_op() {
        let mut selection = Selection::NoSelection;
        assert!(!selection.reconcile(&ids(&[])));
        assert_eq!(selection, Selection::NoSelection);
    }

    #[test]
    fn serializes_as_tagged_state() {
        let json = serde_json::to_value(Selection::Selected("x".into())).unwrap();
        assert_eq!(json, serde_json::json!({"state": "selected", "id": "x"}));
    }
}
