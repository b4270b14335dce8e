//! Display/editing state machine behind every editable label.
//!
//! The widget keeps a local draft that shadows an externally owned value.
//! While displaying, the draft follows the value; while editing, only the
//! draft changes until the edit is committed or cancelled. Nothing here
//! depends on egui, the widget just feeds it [`EditEvent`]s.

/// Narrowest editor, in character cells, so empty labels stay clickable.
pub const MIN_EDITOR_CHARS: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Display,
    Editing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditEvent {
    /// Pointer activation of the displayed value.
    Activate,
    DraftChanged(String),
    /// Confirm key (Enter).
    Confirm,
    /// The editor lost focus without a confirm or cancel key.
    Blur,
    /// Cancel key (Escape).
    Cancel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Unchanged,
    Started,
    /// The draft must be written back to the owner of the value.
    Committed(String),
    Cancelled,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditableText {
    mode: Mode,
    draft: String,
    focus_pending: bool,
}

impl EditableText {
    pub fn new(value: &str) -> Self {
        Self {
            mode: Mode::Display,
            draft: value.to_string(),
            focus_pending: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == Mode::Editing
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Keeps the draft equal to `value` outside of an edit session so the
    /// next session starts from the latest value.
    pub fn sync(&mut self, value: &str) {
        if self.mode == Mode::Display && self.draft != value {
            self.draft.clear();
            self.draft.push_str(value);
        }
    }

    /// Applies one input event. `value` is the current external value.
    pub fn handle(&mut self, event: EditEvent, value: &str) -> EditOutcome {
        match (self.mode, event) {
            (Mode::Display, EditEvent::Activate) => {
                self.draft = value.to_string();
                self.mode = Mode::Editing;
                self.focus_pending = true;
                EditOutcome::Started
            }
            (Mode::Editing, EditEvent::DraftChanged(draft)) => {
                self.draft = draft;
                EditOutcome::Unchanged
            }
            (Mode::Editing, EditEvent::Confirm | EditEvent::Blur) => {
                self.mode = Mode::Display;
                self.focus_pending = false;
                EditOutcome::Committed(self.draft.clone())
            }
            (Mode::Editing, EditEvent::Cancel) => {
                self.draft = value.to_string();
                self.mode = Mode::Display;
                self.focus_pending = false;
                EditOutcome::Cancelled
            }
            _ => EditOutcome::Unchanged,
        }
    }

    /// True once per edit session, on the first frame the editor is shown.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_pending)
    }
}

/// Editor width in character cells: the draft plus two, never below
/// [`MIN_EDITOR_CHARS`].
pub fn editor_width_chars(draft: &str) -> usize {
    (draft.chars().count() + 2).max(MIN_EDITOR_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LabelKey;
    use crate::store::LabelStore;

    /// Runs `events` against one label the way the widget does: sync every
    /// frame, write back on commit.
    fn drive(store: &mut LabelStore, key: LabelKey, events: Vec<EditEvent>) -> EditableText {
        let mut state = EditableText::new(store.get(key));
        for event in events {
            state.sync(store.get(key));
            let current = store.get(key).to_string();
            if let EditOutcome::Committed(value) = state.handle(event, &current) {
                store.update(key, value);
            }
        }
        state.sync(store.get(key));
        state
    }

    #[test]
    fn test_starts_in_display() {
        let state = EditableText::new("MDM2");
        assert_eq!(state.mode(), Mode::Display);
        assert_eq!(state.draft(), "MDM2");
    }

    #[test]
    fn test_confirm_commits_new_value() {
        let mut store = LabelStore::default();
        let state = drive(
            &mut store,
            LabelKey::Mdm2,
            vec![
                EditEvent::Activate,
                EditEvent::DraftChanged("MDM2A".into()),
                EditEvent::Confirm,
            ],
        );
        assert_eq!(store.get(LabelKey::Mdm2), "MDM2A");
        assert!(!state.is_editing());
    }

    #[test]
    fn test_blur_commits_new_value() {
        let mut store = LabelStore::default();
        drive(
            &mut store,
            LabelKey::Peromyscus,
            vec![
                EditEvent::Activate,
                EditEvent::DraftChanged("Peromyscus sp.".into()),
                EditEvent::Blur,
            ],
        );
        assert_eq!(store.get(LabelKey::Peromyscus), "Peromyscus sp.");
    }

    #[test]
    fn test_cancel_restores_value() {
        let mut store = LabelStore::default();
        let state = drive(
            &mut store,
            LabelKey::SpalaxR174k,
            vec![
                EditEvent::Activate,
                EditEvent::DraftChanged(String::new()),
                EditEvent::Cancel,
            ],
        );
        assert_eq!(store.get(LabelKey::SpalaxR174k), "SPALAX R174K");
        assert_eq!(state.draft(), "SPALAX R174K");
        assert!(!state.is_editing());
    }

    #[test]
    fn test_cancel_does_not_emit_commit() {
        let mut state = EditableText::new("APAF1");
        state.handle(EditEvent::Activate, "APAF1");
        state.handle(EditEvent::DraftChanged("X".into()), "APAF1");
        assert_eq!(state.handle(EditEvent::Cancel, "APAF1"), EditOutcome::Cancelled);
    }

    #[test]
    fn test_unchanged_commit_keeps_value() {
        for s in ["", "MDM2", "α-HELIX", "a <b> & \"c\"", "  padded  ", "line\twith tab"] {
            let mut store = LabelStore::default();
            store.update(LabelKey::P55, s);
            drive(
                &mut store,
                LabelKey::P55,
                vec![EditEvent::Activate, EditEvent::Confirm],
            );
            assert_eq!(store.get(LabelKey::P55), s);
        }
    }

    #[test]
    fn test_blur_without_change_still_commits() {
        let mut state = EditableText::new("RNA-seq");
        state.handle(EditEvent::Activate, "RNA-seq");
        assert_eq!(
            state.handle(EditEvent::Blur, "RNA-seq"),
            EditOutcome::Committed("RNA-seq".into())
        );
    }

    #[test]
    fn test_committing_twice_matches_once() {
        let events = || {
            vec![
                EditEvent::Activate,
                EditEvent::DraftChanged("p21".into()),
                EditEvent::Confirm,
            ]
        };
        let mut once = LabelStore::default();
        drive(&mut once, LabelKey::Cdkn1a, events());
        let mut twice = LabelStore::default();
        drive(&mut twice, LabelKey::Cdkn1a, events());
        drive(&mut twice, LabelKey::Cdkn1a, events());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_reentry_starts_from_external_value() {
        let mut state = EditableText::new("Onychomys");
        state.handle(EditEvent::Activate, "Onychomys");
        state.handle(EditEvent::Confirm, "Onychomys");

        // Value replaced by someone else while displaying.
        state.sync("Onychomys torridus");
        assert_eq!(state.draft(), "Onychomys torridus");

        state.handle(EditEvent::Activate, "Onychomys torridus");
        assert_eq!(state.draft(), "Onychomys torridus");
    }

    #[test]
    fn test_activate_initialises_draft_without_sync() {
        let mut state = EditableText::new("old");
        assert_eq!(state.handle(EditEvent::Activate, "new"), EditOutcome::Started);
        assert_eq!(state.draft(), "new");
    }

    #[test]
    fn test_sync_ignored_while_editing() {
        let mut state = EditableText::new("SURVIVAL");
        state.handle(EditEvent::Activate, "SURVIVAL");
        state.handle(EditEvent::DraftChanged("SURV".into()), "SURVIVAL");
        state.sync("SOMETHING ELSE");
        assert_eq!(state.draft(), "SURV");
    }

    #[test]
    fn test_events_outside_session_are_ignored() {
        let mut state = EditableText::new("APOPTOSIS");
        assert_eq!(state.handle(EditEvent::Confirm, "APOPTOSIS"), EditOutcome::Unchanged);
        assert_eq!(state.handle(EditEvent::Blur, "APOPTOSIS"), EditOutcome::Unchanged);
        assert_eq!(state.handle(EditEvent::Cancel, "APOPTOSIS"), EditOutcome::Unchanged);
        assert_eq!(
            state.handle(EditEvent::DraftChanged("x".into()), "APOPTOSIS"),
            EditOutcome::Unchanged
        );
        assert_eq!(state.draft(), "APOPTOSIS");
        assert!(!state.is_editing());
    }

    #[test]
    fn test_second_activate_keeps_session() {
        let mut state = EditableText::new("a");
        state.handle(EditEvent::Activate, "a");
        state.handle(EditEvent::DraftChanged("ab".into()), "a");
        assert_eq!(state.handle(EditEvent::Activate, "a"), EditOutcome::Unchanged);
        assert_eq!(state.draft(), "ab");
    }

    #[test]
    fn test_focus_requested_once_per_session() {
        let mut state = EditableText::new("APAF1");
        assert!(!state.take_focus_request());
        state.handle(EditEvent::Activate, "APAF1");
        assert!(state.take_focus_request());
        assert!(!state.take_focus_request());
        state.handle(EditEvent::Confirm, "APAF1");
        state.handle(EditEvent::Activate, "APAF1");
        assert!(state.take_focus_request());
    }

    #[test]
    fn test_empty_label_opens_empty_draft_at_min_width() {
        let mut store = LabelStore::default();
        store.update(LabelKey::Survival, "");
        let mut state = EditableText::new(store.get(LabelKey::Survival));
        state.handle(EditEvent::Activate, store.get(LabelKey::Survival));
        assert_eq!(state.draft(), "");
        assert_eq!(editor_width_chars(state.draft()), MIN_EDITOR_CHARS);
    }

    #[test]
    fn test_editor_width_grows_with_content() {
        assert_eq!(editor_width_chars("MDM2"), 10);
        assert_eq!(editor_width_chars("12345678"), 10);
        assert_eq!(editor_width_chars("123456789"), 11);
        assert_eq!(editor_width_chars("CONVERGENT HYPOXIA ADAPTATION"), 31);
        // counted in characters, not bytes
        assert_eq!(editor_width_chars("ααααααααααα"), 13);
    }
}
