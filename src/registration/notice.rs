//! User-facing notices shown after a submission.

use super::client::{RegistrationClient, RegistrationError};
use super::form::RegistrationForm;

/// Kind of notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Message shown to the user once a submission settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

impl From<&RegistrationError> for Notice {
    fn from(err: &RegistrationError) -> Self {
        Notice::error(err.user_message())
    }
}

/// Something that can show a notice to the user and wait for it to be
/// acknowledged.
pub trait Notifier {
    fn notify(&mut self, notice: &Notice);
}

/// Prints successes to stdout and errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Success => println!("{}", notice.message),
            NoticeKind::Error => eprintln!("{}", notice.message),
        }
    }
}

/// Keeps every notice it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notices: Vec<Notice>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

/// Submit `form` once and show the outcome through `notifier`.
///
/// Failures are turned into error notices; nothing is retried.
pub async fn submit_and_notify<N: Notifier + ?Sized>(
    client: &RegistrationClient,
    form: &RegistrationForm,
    notifier: &mut N,
) -> Notice {
    let notice = match client.submit(form).await {
        Ok(notice) => notice,
        Err(e) => {
            log::warn!("Registration for {} failed: {}", form.email(), e);
            Notice::from(&e)
        }
    };
    notifier.notify(&notice);
    notice
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_constructors() {
        assert!(Notice::success("OK").is_success());
        assert!(!Notice::error("nope").is_success());
        assert_eq!(Notice::error("nope").message, "nope");
    }

    #[test]
    fn test_server_error_notice_uses_server_message() {
        let err = RegistrationError::Server {
            status: 400,
            message: "Invalid email".to_string(),
        };
        assert_eq!(Notice::from(&err), Notice::error("Invalid email"));
    }

    #[test]
    fn test_recording_notifier_keeps_order() {
        let mut notifier = RecordingNotifier::new();
        notifier.notify(&Notice::success("first"));
        notifier.notify(&Notice::error("second"));
        assert_eq!(notifier.notices.len(), 2);
        assert_eq!(notifier.last(), Some(&Notice::error("second")));
    }
}
