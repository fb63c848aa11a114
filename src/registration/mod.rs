//! Registration form submission.
//!
//! The form is posted as JSON to a remote endpoint and the outcome is shown to
//! the user as a [`Notice`]. Validation is left to the endpoint.

mod client;
mod form;
mod notice;

pub use client::{
    RegistrationClient, RegistrationError, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_ENDPOINT,
    DEFAULT_SUCCESS_MESSAGE, DEFAULT_TIMEOUT, NETWORK_ERROR_MESSAGE,
};
pub use form::{RegistrationForm, ServerReply};
pub use notice::{
    submit_and_notify, ConsoleNotifier, Notice, NoticeKind, Notifier, RecordingNotifier,
};
