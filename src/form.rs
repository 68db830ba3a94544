//! Contact form - field validation and the inline status message.
//!
//! Submission is simulated: a valid form is logged and cleared, nothing is
//! transmitted or stored.
//!
//! Rules are checked in a fixed order and only the first failure is
//! reported: name, email, subject, message.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use spark_signals::{signal, Signal};
use tracing::{debug, info};

use crate::error::ValidationError;

const MIN_NAME_CHARS: usize = 2;
const MIN_SUBJECT_CHARS: usize = 3;
const MIN_MESSAGE_CHARS: usize = 10;

pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";

/// `None` only if the pattern fails to compile, which rejects every address.
static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

// =============================================================================
// VALIDATION
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

fn trimmed_len(value: &str) -> usize {
    value.trim().chars().count()
}

/// Check every rule in order and report the first failure.
pub fn validate(submission: &ContactSubmission) -> Result<(), ValidationError> {
    if trimmed_len(&submission.name) < MIN_NAME_CHARS {
        return Err(ValidationError::Name);
    }
    if !is_valid_email(&submission.email) {
        return Err(ValidationError::Email);
    }
    if trimmed_len(&submission.subject) < MIN_SUBJECT_CHARS {
        return Err(ValidationError::Subject);
    }
    if trimmed_len(&submission.message) < MIN_MESSAGE_CHARS {
        return Err(ValidationError::Message);
    }
    Ok(())
}

// =============================================================================
// STATUS MESSAGE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePhase {
    Visible,
    FadingOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormMessage {
    pub kind: MessageKind,
    pub text: String,
    pub phase: MessagePhase,
    /// Increments with every message, so timers for a replaced message
    /// can tell they are stale.
    pub generation: u64,
}

// =============================================================================
// FORM
// =============================================================================

pub struct ContactForm {
    fields: ContactSubmission,
    message: Signal<Option<FormMessage>>,
    generation: u64,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            fields: ContactSubmission::default(),
            message: signal(None),
            generation: 0,
        }
    }

    pub fn fields(&self) -> &ContactSubmission {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut ContactSubmission {
        &mut self.fields
    }

    pub fn fill(&mut self, submission: ContactSubmission) {
        self.fields = submission;
    }

    /// Validate and "send" the current fields.
    ///
    /// On success the fields are cleared and a success message replaces any
    /// previous one. On failure the fields are kept for correction and the
    /// first failing rule is shown.
    pub fn submit(&mut self) -> Result<(), ValidationError> {
        match validate(&self.fields) {
            Ok(()) => {
                info!(
                    name = %self.fields.name.trim(),
                    email = %self.fields.email,
                    subject = %self.fields.subject.trim(),
                    "contact form submitted (simulated, not sent)"
                );
                self.fields = ContactSubmission::default();
                self.show(MessageKind::Success, SUCCESS_MESSAGE.to_string());
                Ok(())
            }
            Err(err) => {
                debug!(rule = ?err, "contact form rejected");
                self.show(MessageKind::Error, err.to_string());
                Err(err)
            }
        }
    }

    fn show(&mut self, kind: MessageKind, text: String) {
        self.generation += 1;
        self.message.set(Some(FormMessage {
            kind,
            text,
            phase: MessagePhase::Visible,
            generation: self.generation,
        }));
    }

    /// Generation of the message currently shown.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start fading the message of `generation`. Stale generations are ignored.
    pub fn begin_fade(&self, generation: u64) -> bool {
        match self.message.get() {
            Some(mut message) if message.generation == generation => {
                message.phase = MessagePhase::FadingOut;
                self.message.set(Some(message));
                true
            }
            _ => false,
        }
    }

    /// Remove the message of `generation`. Stale generations are ignored.
    pub fn remove_message(&self, generation: u64) -> bool {
        match self.message.get() {
            Some(message) if message.generation == generation => {
                self.message.set(None);
                true
            }
            _ => false,
        }
    }

    pub fn message(&self) -> Option<FormMessage> {
        self.message.get()
    }

    pub fn message_signal(&self) -> Signal<Option<FormMessage>> {
        self.message.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContactSubmission {
        ContactSubmission::new(
            "Ada Lovelace",
            "ada@example.com",
            "Collaboration",
            "Would love to chat about simulations.",
        )
    }

    #[test]
    fn test_valid_submission() {
        assert_eq!(validate(&valid()), Ok(()));
    }

    #[test]
    fn test_email_reported_first_when_name_passes() {
        let submission = ContactSubmission::new("Al", "bad-email", "Hi", "short");
        assert_eq!(validate(&submission), Err(ValidationError::Email));
    }

    #[test]
    fn test_rule_order() {
        let all_bad = ContactSubmission::new(" A ", "nope", "x", "y");
        assert_eq!(validate(&all_bad), Err(ValidationError::Name));

        let subject_bad = ContactSubmission {
            subject: "  Hi  ".to_string(),
            message: "tiny".to_string(),
            ..valid()
        };
        assert_eq!(validate(&subject_bad), Err(ValidationError::Subject));

        let message_bad = ContactSubmission {
            message: "   too short   ".to_string(),
            ..valid()
        };
        assert_eq!(validate(&message_bad), Err(ValidationError::Message));
    }

    #[test]
    fn test_email_pattern() {
        assert!(EMAIL_PATTERN.is_some());
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.domain.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
        assert!(!is_valid_email("a@@b.de"));
        assert!(!is_valid_email(" a@b.de"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ValidationError::Name.to_string(), "Please enter a valid name.");
        assert_eq!(
            ValidationError::Email.to_string(),
            "Please enter a valid email address."
        );
        assert_eq!(ValidationError::Subject.to_string(), "Please enter a subject.");
        assert_eq!(
            ValidationError::Message.to_string(),
            "Please enter a message (at least 10 characters)."
        );
    }

    #[test]
    fn test_submit_success_clears_fields() {
        let mut form = ContactForm::new();
        form.fill(valid());

        assert!(form.submit().is_ok());

        assert_eq!(form.fields(), &ContactSubmission::default());
        let message = form.message().unwrap();
        assert_eq!(message.kind, MessageKind::Success);
        assert_eq!(message.text, SUCCESS_MESSAGE);
        assert_eq!(message.phase, MessagePhase::Visible);
    }

    #[test]
    fn test_submit_failure_preserves_fields() {
        let mut form = ContactForm::new();
        let submission = ContactSubmission::new("Al", "bad-email", "Hi", "short");
        form.fill(submission.clone());

        assert_eq!(form.submit(), Err(ValidationError::Email));

        assert_eq!(form.fields(), &submission);
        let message = form.message().unwrap();
        assert_eq!(message.kind, MessageKind::Error);
        assert_eq!(message.text, "Please enter a valid email address.");
    }

    #[test]
    fn test_new_message_replaces_old() {
        let mut form = ContactForm::new();
        form.submit().unwrap_err();
        let first = form.generation();

        form.fill(valid());
        form.submit().unwrap();

        // Timers for the first message no longer apply
        assert!(!form.begin_fade(first));
        assert!(!form.remove_message(first));
        assert_eq!(form.message().unwrap().kind, MessageKind::Success);
    }

    #[test]
    fn test_fade_then_remove() {
        let mut form = ContactForm::new();
        form.submit().unwrap_err();
        let generation = form.generation();

        assert!(form.begin_fade(generation));
        assert_eq!(form.message().unwrap().phase, MessagePhase::FadingOut);

        assert!(form.remove_message(generation));
        assert_eq!(form.message(), None);
    }

    #[test]
    fn test_submission_from_json() {
        let submission: ContactSubmission =
            serde_json::from_str(r#"{ "name": "Ada", "email": "ada@example.com" }"#).unwrap();

        assert_eq!(submission.name, "Ada");
        assert_eq!(submission.subject, "");
    }
}
