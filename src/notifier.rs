//! Delivery of consultation confirmation links.
//!
//! The site does not send real email yet. [`LogNotifier`] writes the link to
//! the log; a mailer only has to implement [`Notifier`].

use log::info;
use uuid::Uuid;

/// Everything a notifier needs to ask the requester to confirm.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfirmationNotice {
    pub consultation_id: Uuid,
    pub email: String,
    pub subject: String,
    pub confirm_url: String,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum NotifyError {
    #[error("Failed to deliver confirmation to {email}: {reason}")]
    DeliveryFailed { email: String, reason: String },
}

/// Out-of-band channel for confirmation links.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send_confirmation(&self, notice: ConfirmationNotice) -> Result<(), NotifyError>;
}

/// Logs the confirmation link instead of mailing it.
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn send_confirmation(&self, notice: ConfirmationNotice) -> Result<(), NotifyError> {
        info!(
            "Confirmation for consultation {} ({}) to {}: {}",
            notice.consultation_id, notice.subject, notice.email, notice.confirm_url
        );
        Ok(())
    }
}

/// Builds `{base}/api/confirm?token={token}`.
///
/// Tokens are UUIDs, so they need no escaping.
pub fn confirm_url(public_url: &str, token: &str) -> String {
    format!("{}/api/confirm?token={}", public_url.trim_end_matches('/'), token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_url_joins_without_double_slash() {
        assert_eq!(
            confirm_url("https://quest.example/", "abc"),
            "https://quest.example/api/confirm?token=abc"
        );
        assert_eq!(
            confirm_url("http://localhost:5000", "abc"),
            "http://localhost:5000/api/confirm?token=abc"
        );
    }

    #[tokio::test]
    async fn test_log_notifier_never_fails() {
        let notice = ConfirmationNotice {
            consultation_id: Uuid::new_v4(),
            email: "b@x.com".to_string(),
            subject: "Intro".to_string(),
            confirm_url: confirm_url("http://localhost:5000", "tok"),
        };
        assert!(LogNotifier.send_confirmation(notice).await.is_ok());
    }
}
