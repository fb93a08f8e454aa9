//! User-facing notifications for mutation outcomes.
//!
//! Success messages name the agreement; failures name the action and the reason.
//! Validation failures list every field so the user can fix them in one go.

use crate::entities::Agreement;
use crate::errors::Error;
use std::fmt;

/// Whether an action succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// The action completed and the data was reloaded
    Success,
    /// The action was rejected or failed; the previous data is still shown
    Error,
}

/// User action a notification reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// PDF upload
    Upload,
    /// Agreement edit
    Update,
    /// Agreement deletion
    Delete,
    /// Data reload
    Load,
}

/// A dismissible message shown after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Success or error
    pub kind: NotificationKind,
    /// Message text
    pub message: String,
}

impl Notification {
    /// A success notification
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    /// An error notification
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    /// After a PDF was processed into a new agreement.
    #[must_use]
    pub fn uploaded(agreement: &Agreement) -> Self {
        Self::success(format!(
            "Successfully processed {} agreement!",
            agreement.vendor_name()
        ))
    }

    /// After an edit; mentions regenerated events when the backend reports them.
    #[must_use]
    pub fn updated(vendor: &str, calendar_updated: bool) -> Self {
        let mut message = format!("Successfully updated {vendor} agreement");
        if calendar_updated {
            message.push_str(" and refreshed calendar events");
        }
        Self::success(message)
    }

    /// After a deletion. `removed` is the agreement as last seen, if it was known.
    #[must_use]
    pub fn deleted(removed: Option<&Agreement>) -> Self {
        let vendor = removed.map_or("the", Agreement::vendor_name);
        Self::success(format!("Successfully deleted {vendor} agreement"))
    }

    /// Describes a failed action.
    #[must_use]
    pub fn failed(action: Action, error: &Error) -> Self {
        let reason = match error {
            Error::Validation { errors } => {
                let fields: Vec<String> = errors
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect();
                return Self::error(format!("Please fix the following:\n{}", fields.join("\n")));
            }
            Error::UnsupportedInput { message } => return Self::error(message.clone()),
            other => error_reason(other),
        };

        let message = match action {
            Action::Upload => format!("Upload failed: {reason}"),
            Action::Update => format!("Failed to update agreement: {reason}"),
            Action::Delete => format!("Failed to delete agreement: {reason}"),
            Action::Load => format!("Failed to load data: {reason}"),
        };
        Self::error(message)
    }

    /// Adds a note that the action went through but the data could not be refreshed.
    #[must_use]
    pub fn with_reload_failure(mut self, error: &Error) -> Self {
        self.message.push_str(&format!(
            "\n⚠️ The data could not be refreshed ({}); use `/refresh` to try again.",
            error_reason(error)
        ));
        self
    }

    /// True for success notifications
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}

fn error_reason(error: &Error) -> String {
    match error {
        Error::Backend { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.kind {
            NotificationKind::Success => "✅",
            NotificationKind::Error => "❌",
        };
        write!(f, "{icon} {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validation::{Field, ValidationErrors};
    use crate::test_utils::agreement;

    #[test]
    fn test_success_messages() {
        let a = agreement("a1", "Acme Cloud", None, None);
        assert_eq!(
            Notification::uploaded(&a).to_string(),
            "✅ Successfully processed Acme Cloud agreement!"
        );
        assert_eq!(
            Notification::updated("Acme Cloud", true).message,
            "Successfully updated Acme Cloud agreement and refreshed calendar events"
        );
        assert_eq!(
            Notification::updated("Acme Cloud", false).message,
            "Successfully updated Acme Cloud agreement"
        );
        assert_eq!(
            Notification::deleted(Some(&a)).message,
            "Successfully deleted Acme Cloud agreement"
        );
        assert_eq!(
            Notification::deleted(None).message,
            "Successfully deleted the agreement"
        );
    }

    #[test]
    fn test_failure_messages() {
        let backend = Error::Backend {
            status: 500,
            message: "Failed to process PDF".to_string(),
        };
        let n = Notification::failed(Action::Upload, &backend);
        assert!(!n.is_success());
        assert_eq!(n.to_string(), "❌ Upload failed: Failed to process PDF");

        let missing = Error::AgreementNotFound { id: "a9".to_string() };
        assert_eq!(
            Notification::failed(Action::Delete, &missing).message,
            "Failed to delete agreement: Agreement not found: a9"
        );

        let unsupported = Error::UnsupportedInput {
            message: "Please upload a PDF file".to_string(),
        };
        assert_eq!(
            Notification::failed(Action::Upload, &unsupported).message,
            "Please upload a PDF file"
        );
    }

    #[test]
    fn test_validation_failure_lists_fields() {
        let mut errors = ValidationErrors::default();
        errors.insert(Field::EndDate, "End date must be after effective date");
        errors.insert(Field::Vendor, "Vendor name is required");
        let n = Notification::failed(Action::Update, &Error::from(errors));
        assert_eq!(
            n.message,
            "Please fix the following:\nvendor: Vendor name is required\nend_date: End date must be after effective date"
        );
    }

    #[test]
    fn test_success_with_reload_failure() {
        let a = agreement("a1", "Acme Cloud", None, None);
        let down = Error::Backend {
            status: 503,
            message: "Service unavailable".to_string(),
        };
        let n = Notification::deleted(Some(&a)).with_reload_failure(&down);
        assert!(n.is_success());
        assert_eq!(
            n.message,
            "Successfully deleted Acme Cloud agreement\n⚠️ The data could not be refreshed (Service unavailable); use `/refresh` to try again."
        );
    }
}
