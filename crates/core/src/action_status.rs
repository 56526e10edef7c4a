//! Action workflow status and per-status aggregates.
//!
//! Discriminants match the seed rows of the `action_statuses` lookup table.

use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Status ID type matching SMALLINT in the database.
pub type StatusId = i16;

/// Lifecycle status of an Action.
#[repr(i16)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    NotStarted = 1,
    InProgress = 2,
    Completed = 3,
}

impl ActionStatus {
    pub const ALL: [ActionStatus; 3] = [
        ActionStatus::NotStarted,
        ActionStatus::InProgress,
        ActionStatus::Completed,
    ];

    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Map a database status ID back to a status.
    pub fn from_id(id: StatusId) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Wire token used in URLs and JSON (`not_started`, `in_progress`, `completed`).
    pub fn token(self) -> &'static str {
        match self {
            ActionStatus::NotStarted => "not_started",
            ActionStatus::InProgress => "in_progress",
            ActionStatus::Completed => "completed",
        }
    }

    /// Parse a status token case-insensitively.
    ///
    /// Hyphens and spaces are accepted in place of underscores so that
    /// `In-Progress` and `in progress` both map to [`ActionStatus::InProgress`].
    pub fn parse_token(token: &str) -> Option<Self> {
        let normalized = token.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL.into_iter().find(|s| s.token() == normalized)
    }

    /// Localized display label for a single Action's status.
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (ActionStatus::NotStarted, Language::English) => "Not Started",
            (ActionStatus::InProgress, Language::English) => "In Progress",
            (ActionStatus::Completed, Language::English) => "Completed",
            (ActionStatus::NotStarted, Language::Irish) => "Gan Tosú",
            (ActionStatus::InProgress, Language::Irish) => "Ar Siúl",
            (ActionStatus::Completed, Language::Irish) => "Críochnaithe",
        }
    }

    /// Localized heading for a list of Actions in this status.
    pub fn list_title(self, language: Language) -> &'static str {
        match (self, language) {
            (ActionStatus::NotStarted, Language::English) => "Actions Not Started",
            (ActionStatus::InProgress, Language::English) => "Actions In Progress",
            (ActionStatus::Completed, Language::English) => "Completed Actions",
            (ActionStatus::NotStarted, Language::Irish) => "Gníomhartha Gan Tosú",
            (ActionStatus::InProgress, Language::Irish) => "Gníomhartha Ar Siúl",
            (ActionStatus::Completed, Language::Irish) => "Gníomhartha Críochnaithe",
        }
    }
}

impl From<ActionStatus> for StatusId {
    fn from(value: ActionStatus) -> Self {
        value as StatusId
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Count of Actions per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub completed: i64,
    pub in_progress: i64,
    pub not_started: i64,
}

impl StatusCounts {
    /// Build counts from `(status_id, count)` rows, ignoring unknown IDs.
    pub fn from_rows(rows: &[(StatusId, i64)]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, &(id, count)| {
            match ActionStatus::from_id(id) {
                Some(ActionStatus::Completed) => acc.completed += count,
                Some(ActionStatus::InProgress) => acc.in_progress += count,
                Some(ActionStatus::NotStarted) => acc.not_started += count,
                None => {}
            }
            acc
        })
    }

    pub fn total(&self) -> i64 {
        self.completed + self.in_progress + self.not_started
    }

    /// Percentage of `part` in the total, rounded to the nearest integer.
    ///
    /// Returns 0 when there are no Actions at all.
    pub fn percent(&self, part: i64) -> i64 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        (part * 100 + total / 2) / total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_ids_match_seed_data() {
        assert_eq!(ActionStatus::NotStarted.id(), 1);
        assert_eq!(ActionStatus::InProgress.id(), 2);
        assert_eq!(ActionStatus::Completed.id(), 3);
        let id: StatusId = ActionStatus::Completed.into();
        assert_eq!(id, 3);
    }

    #[test]
    fn from_id_rejects_unknown() {
        assert_eq!(ActionStatus::from_id(2), Some(ActionStatus::InProgress));
        assert_eq!(ActionStatus::from_id(0), None);
        assert_eq!(ActionStatus::from_id(4), None);
    }

    #[test]
    fn parse_token_is_case_insensitive() {
        assert_eq!(ActionStatus::parse_token("COMPLETED"), Some(ActionStatus::Completed));
        assert_eq!(ActionStatus::parse_token("In_Progress"), Some(ActionStatus::InProgress));
        assert_eq!(ActionStatus::parse_token("in-progress"), Some(ActionStatus::InProgress));
        assert_eq!(ActionStatus::parse_token("Not Started"), Some(ActionStatus::NotStarted));
    }

    #[test]
    fn parse_token_rejects_unknown() {
        assert_eq!(ActionStatus::parse_token("archived"), None);
        assert_eq!(ActionStatus::parse_token(""), None);
    }

    #[test]
    fn serde_uses_tokens() {
        let json = serde_json::to_string(&ActionStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: ActionStatus = serde_json::from_str("\"not_started\"").unwrap();
        assert_eq!(parsed, ActionStatus::NotStarted);
    }

    #[test]
    fn labels_are_localized() {
        assert_eq!(ActionStatus::Completed.label(Language::English), "Completed");
        assert_eq!(ActionStatus::Completed.label(Language::Irish), "Críochnaithe");
        assert_eq!(
            ActionStatus::InProgress.list_title(Language::English),
            "Actions In Progress"
        );
    }

    #[test]
    fn counts_from_rows() {
        let counts = StatusCounts::from_rows(&[(3, 4), (2, 5), (1, 1), (9, 100)]);
        assert_eq!(counts.completed, 4);
        assert_eq!(counts.in_progress, 5);
        assert_eq!(counts.not_started, 1);
        assert_eq!(counts.total(), 10);
        assert_eq!(counts.percent(counts.completed), 40);
    }

    #[test]
    fn percent_of_empty_is_zero() {
        assert_eq!(StatusCounts::default().percent(0), 0);
    }
}
