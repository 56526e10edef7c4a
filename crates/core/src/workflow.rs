//! Approval and status state machine for Action edits.
//!
//! [`apply_edit`] is the single transition function run before any Action
//! write reaches storage. It recomputes `status` from the submitted update
//! text, stamps `progress_started_at` on the first move into progress,
//! applies the English approval rule and the Irish approval firewall, sets
//! attribution, and decides whether superusers need to be told about the
//! edit. It performs no I/O.

use serde::Serialize;

use crate::action_status::ActionStatus;
use crate::html::has_visible_text;
use crate::language::Language;
use crate::types::{Date, DbId};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// The user submitting an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Editor {
    pub user_id: DbId,
    /// Superusers are privileged: their saves count as approval.
    pub is_privileged: bool,
}

/// The six bilingual text fields of an Action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionContent {
    pub small_description: String,
    pub small_description_ga: Option<String>,
    pub description: String,
    pub description_ga: Option<String>,
    pub update: String,
    pub update_ga: Option<String>,
}

/// Workflow flags and attribution of an Action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionState {
    pub status: ActionStatus,
    pub is_approved: bool,
    pub is_ga_approved: bool,
    pub progress_started_at: Option<Date>,
    pub created_by: Option<DbId>,
    pub updated_by: Option<DbId>,
}

/// The stored Action an edit is applied to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionSnapshot {
    pub state: ActionState,
    pub content: ActionContent,
}

/// Field values submitted by an editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedEdit {
    /// Status chosen on the form. Defaults to the stored status when the
    /// editor did not pick one.
    pub status: ActionStatus,
    pub content: ActionContent,
    /// Explicit Irish approval. Only honoured for privileged editors.
    pub is_ga_approved: Option<bool>,
}

impl SubmittedEdit {
    /// Drop everything an editor is not allowed to change.
    ///
    /// Unprivileged editors may only touch `update` and `update_ga`; every
    /// other field keeps its stored value.
    pub fn editable_by(self, editor: &Editor, current: Option<&ActionSnapshot>) -> Self {
        if editor.is_privileged {
            return self;
        }
        match current {
            Some(snapshot) => SubmittedEdit {
                status: snapshot.state.status,
                content: ActionContent {
                    update: self.content.update,
                    update_ga: self.content.update_ga,
                    ..snapshot.content.clone()
                },
                is_ga_approved: None,
            },
            None => SubmittedEdit {
                is_ga_approved: None,
                ..self
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Change detection
// ---------------------------------------------------------------------------

/// Which text fields differ between the stored and submitted content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchedFields {
    pub update: bool,
    pub update_ga: bool,
    /// Any Irish field, including `update_ga`.
    pub irish: bool,
}

impl TouchedFields {
    /// Compare two versions of the content. Absent and empty Irish values are
    /// treated as equal.
    pub fn between(before: &ActionContent, after: &ActionContent) -> Self {
        fn norm(v: &Option<String>) -> &str {
            v.as_deref().unwrap_or_default()
        }
        let update_ga = norm(&before.update_ga) != norm(&after.update_ga);
        let irish = update_ga
            || norm(&before.small_description_ga) != norm(&after.small_description_ga)
            || norm(&before.description_ga) != norm(&after.description_ga);
        Self {
            update: before.update != after.update,
            update_ga,
            irish,
        }
    }

    /// Languages whose progress text changed, English first.
    pub fn update_languages(&self) -> Vec<Language> {
        let mut languages = Vec::with_capacity(2);
        if self.update {
            languages.push(Language::English);
        }
        if self.update_ga {
            languages.push(Language::Irish);
        }
        languages
    }
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Superusers must review new progress text from an unprivileged editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateNotice {
    /// Languages whose update text changed (never empty).
    pub languages: Vec<Language>,
}

/// Result of [`apply_edit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub state: ActionState,
    pub content: ActionContent,
    pub touched: TouchedFields,
    /// `Some` when a notification must be queued after the write commits.
    pub notice: Option<UpdateNotice>,
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// Status implied by a submission: an explicit COMPLETED always wins,
/// otherwise any visible update text (English or Irish) means IN_PROGRESS.
pub fn derive_status(selected: ActionStatus, content: &ActionContent) -> ActionStatus {
    if selected == ActionStatus::Completed {
        return ActionStatus::Completed;
    }
    let has_update = has_visible_text(&content.update)
        || content.update_ga.as_deref().is_some_and(has_visible_text);
    if has_update {
        ActionStatus::InProgress
    } else {
        ActionStatus::NotStarted
    }
}

/// Apply an edit to an Action (or create one when `current` is `None`).
///
/// `edit` must already be restricted with [`SubmittedEdit::editable_by`].
pub fn apply_edit(
    current: Option<&ActionSnapshot>,
    editor: &Editor,
    edit: &SubmittedEdit,
    today: Date,
) -> EditOutcome {
    let blank = ActionSnapshot::default();
    let before = current.unwrap_or(&blank);
    let mut state = before.state.clone();

    // Attribution.
    if current.is_none() {
        state.created_by = Some(editor.user_id);
    }
    state.updated_by = Some(editor.user_id);

    // Status.
    state.status = derive_status(edit.status, &edit.content);
    if state.status == ActionStatus::InProgress && state.progress_started_at.is_none() {
        state.progress_started_at = Some(today);
    }

    // English approval.
    state.is_approved = editor.is_privileged || state.status == ActionStatus::Completed;

    // Irish approval firewall.
    let touched = TouchedFields::between(&before.content, &edit.content);
    if editor.is_privileged {
        if let Some(ga_approved) = edit.is_ga_approved {
            state.is_ga_approved = ga_approved;
        }
    } else if touched.irish {
        state.is_ga_approved = false;
    }

    let notice = if editor.is_privileged {
        None
    } else {
        let languages = touched.update_languages();
        (!languages.is_empty()).then_some(UpdateNotice { languages })
    };

    EditOutcome {
        state,
        content: edit.content.clone(),
        touched,
        notice,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
