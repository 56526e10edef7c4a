//! Event-to-email routing for `action.update_submitted`.

use tokio::sync::broadcast;
use tracker_core::language::Language;
use tracker_db::repositories::UserRepo;
use tracker_db::DbPool;
use tracker_events::{EmailDelivery, EmailMessage, TrackerEvent, UpdateSubmitted};

/// Sends approval-request emails to superusers.
///
/// Delivery is best effort: every failure is logged and the loop moves on.
pub struct ApprovalNotifier {
    pool: DbPool,
    /// `None` when SMTP is not configured; events are then only logged.
    email: Option<EmailDelivery>,
    admin_base_url: String,
}

impl ApprovalNotifier {
    pub fn new(pool: DbPool, email: Option<EmailDelivery>, admin_base_url: String) -> Self {
        Self {
            pool,
            email,
            admin_base_url,
        }
    }

    /// Run until the [`EventBus`](tracker_events::EventBus) is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<TrackerEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Some(details) = event.as_update_submitted() {
                        self.notify(&details).await;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Approval notifier lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, approval notifier shutting down");
                    break;
                }
            }
        }
    }

    async fn notify(&self, details: &UpdateSubmitted) {
        let Some(email) = &self.email else {
            tracing::info!(
                action_id = details.action_id,
                "SMTP not configured, skipping approval email"
            );
            return;
        };

        let recipients = match UserRepo::list_active_superuser_emails(&self.pool).await {
            Ok(r) if r.is_empty() => {
                tracing::warn!(
                    action_id = details.action_id,
                    "No active superuser has an email address, skipping approval email"
                );
                return;
            }
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load approval recipients");
                return;
            }
        };

        let message = compose(details, recipients, &self.admin_base_url);
        if let Err(e) = email.send(&message).await {
            tracing::error!(
                error = %e,
                action_id = details.action_id,
                "Failed to send approval email"
            );
        }
    }
}

fn language_name(language: Language) -> &'static str {
    match language {
        Language::English => "English",
        Language::Irish => "Irish",
    }
}

/// Build the approval request sent to `recipients`.
pub fn compose(details: &UpdateSubmitted, recipients: Vec<String>, base_url: &str) -> EmailMessage {
    let languages = details
        .languages
        .iter()
        .map(|l| language_name(*l))
        .collect::<Vec<_>>()
        .join(" and ");

    let body = format!(
        "{editor} updated the {languages} progress text of \"{title}\".\n\n\
         The update is hidden from the public dashboard until a superuser \
         approves it.\n\n\
         Review it here: {base}/admin/actions/{id}\n",
        editor = details.editor_username,
        title = details.action_title,
        base = base_url.trim_end_matches('/'),
        id = details.action_id,
    );

    EmailMessage {
        to: recipients,
        subject: format!("Approval needed: \"{}\" was updated", details.action_title),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(languages: Vec<Language>) -> UpdateSubmitted {
        UpdateSubmitted {
            action_id: 42,
            action_title: "Launch portal".into(),
            editor_username: "staff".into(),
            languages,
        }
    }

    #[test]
    fn subject_names_the_action() {
        let msg = compose(
            &details(vec![Language::English]),
            vec!["boss@example.ie".into()],
            "https://tracker.example.ie",
        );
        assert_eq!(msg.subject, "Approval needed: \"Launch portal\" was updated");
        assert_eq!(msg.to, vec!["boss@example.ie".to_string()]);
    }

    #[test]
    fn body_names_editor_languages_and_link() {
        let msg = compose(
            &details(vec![Language::English, Language::Irish]),
            vec![],
            "https://tracker.example.ie/",
        );
        assert!(msg.body.contains("staff updated the English and Irish progress text"));
        assert!(msg
            .body
            .contains("https://tracker.example.ie/admin/actions/42"));
    }

    #[test]
    fn irish_only_update() {
        let msg = compose(&details(vec![Language::Irish]), vec![], "http://x");
        assert!(msg.body.contains("the Irish progress text"));
    }
}
