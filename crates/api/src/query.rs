//! Query parameter types shared across handler modules.
//!
//! Public dashboard parameters are read as raw strings so malformed values
//! fall back to defaults instead of producing extractor rejections.

use serde::Deserialize;
use tracker_core::action_status::ActionStatus;
use tracker_core::error::CoreError;
use tracker_core::language::Language;
use tracker_core::types::DbId;

/// `?lang=en|ga`. Missing or unknown codes mean English.
#[derive(Debug, Default, Deserialize)]
pub struct LangParams {
    pub lang: Option<String>,
}

impl LangParams {
    pub fn language(&self) -> Language {
        Language::from_optional(self.lang.as_deref())
    }
}

/// Parameters of the status-filtered action listing.
#[derive(Debug, Default, Deserialize)]
pub struct ActionListParams {
    pub status: Option<String>,
    pub theme_id: Option<String>,
    pub page: Option<String>,
    pub lang: Option<String>,
}

impl ActionListParams {
    pub fn language(&self) -> Language {
        Language::from_optional(self.lang.as_deref())
    }

    /// Parse `theme_id`. Blank means "all themes"; anything non-numeric is a
    /// validation error.
    pub fn theme_id(&self) -> Result<Option<DbId>, CoreError> {
        match self.theme_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| CoreError::Validation(format!("Invalid theme_id '{raw}'"))),
        }
    }
}

/// `?year=` for the roadmap. Validated by the roadmap engine itself.
#[derive(Debug, Default, Deserialize)]
pub struct RoadmapParams {
    pub year: Option<String>,
}

/// `?theme_id=` for the admin objective listing.
#[derive(Debug, Default, Deserialize)]
pub struct ObjectiveFilterParams {
    pub theme_id: Option<DbId>,
}

/// Filters and search for the admin action listing.
#[derive(Debug, Default, Deserialize)]
pub struct ActionFilterParams {
    pub objective_id: Option<DbId>,
    /// Status token; unknown tokens are a validation error.
    pub status: Option<String>,
    pub is_approved: Option<bool>,
    pub updated_by: Option<DbId>,
    pub search: Option<String>,
}

impl ActionFilterParams {
    pub fn status(&self) -> Result<Option<ActionStatus>, CoreError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(token) => ActionStatus::parse_token(token)
                .map(Some)
                .ok_or_else(|| CoreError::unknown_status(token)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_id_parsing() {
        let mut params = ActionListParams::default();
        assert_eq!(params.theme_id().unwrap(), None);

        params.theme_id = Some(" ".into());
        assert_eq!(params.theme_id().unwrap(), None);

        params.theme_id = Some("42".into());
        assert_eq!(params.theme_id().unwrap(), Some(42));

        params.theme_id = Some("abc".into());
        assert!(params.theme_id().is_err());
    }

    #[test]
    fn action_filter_status_token() {
        let mut params = ActionFilterParams::default();
        assert_eq!(params.status().unwrap(), None);

        params.status = Some("in_progress".into());
        assert_eq!(params.status().unwrap(), Some(ActionStatus::InProgress));

        params.status = Some("archived".into());
        assert!(matches!(params.status(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn language_defaults_to_english() {
        assert_eq!(LangParams::default().language(), Language::English);
        let ga = LangParams {
            lang: Some("ga".into()),
        };
        assert_eq!(ga.language(), Language::Irish);
    }
}
