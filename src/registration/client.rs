//! RegistrationClient - posts the registration form to the remote endpoint.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::form::{RegistrationForm, ServerReply};
use super::notice::Notice;

/// Environment variable overriding the registration service base URL.
pub const BASE_URL_ENV: &str = "CEI_API_BASE_URL";

/// Default base URL of the registration service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Path the form is posted to.
pub const DEFAULT_ENDPOINT: &str = "/api/registrar";

/// Message shown when the endpoint accepts the form without a message.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Registration successful";

/// Message shown when the endpoint could not be reached.
pub const NETWORK_ERROR_MESSAGE: &str = "Network or server error";

/// Default timeout for the whole request (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when submitting a registration.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("{message}")]
    Server {
        /// HTTP status code returned by the endpoint
        status: u16,
        /// Server-provided message, or "Error: <status>"
        message: String,
    },

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("A registration is already being submitted")]
    AlreadySubmitting,

    #[error("Invalid base URL: {0:?}")]
    InvalidBaseUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl RegistrationError {
    /// Text shown to the user for this error.
    pub fn user_message(&self) -> String {
        match self {
            RegistrationError::Server { message, .. } => message.clone(),
            RegistrationError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Clears the in-flight flag when the submission settles or is dropped.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Client for the registration endpoint.
///
/// Only one submission may be in flight at a time; a second concurrent call to
/// [`RegistrationClient::submit`] fails with
/// [`RegistrationError::AlreadySubmitting`] without sending anything.
pub struct RegistrationClient {
    base_url: String,
    endpoint: String,
    http_client: reqwest::Client,
    in_flight: AtomicBool,
}

impl RegistrationClient {

    /// Create a client for a given base URL and the default endpoint.
    ///
    /// Useful for testing against a mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, RegistrationError> {
        Self::with_settings(base_url, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT)
    }

    /// Create a client for a given base URL and endpoint path.
    pub fn with_endpoint(
        base_url: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, RegistrationError> {
        Self::with_settings(base_url, endpoint, DEFAULT_TIMEOUT)
    }

    /// Create a client with every setting explicit.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationError::InvalidBaseUrl` unless the base URL starts
    /// with `http://` or `https://`.
    pub fn with_settings(
        base_url: impl Into<String>,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RegistrationError> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(RegistrationError::InvalidBaseUrl(base_url));
        }

        let mut endpoint = endpoint.into();
        if !endpoint.starts_with('/') {
            endpoint.insert(0, '/');
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT.min(timeout))
            .build()
            .map_err(RegistrationError::ClientBuild)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoint,
            http_client,
            in_flight: AtomicBool::new(false),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full URL the form is posted to.
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.endpoint)
    }

    /// Whether a submission is currently in flight.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Post the form as JSON and interpret the reply.
    ///
    /// A 2xx reply yields a success notice carrying the server message (or a
    /// default). Any other status yields `RegistrationError::Server` with the
    /// server message or `"Error: <status>"`. A reply body that is not JSON is
    /// treated as carrying no message.
    ///
    /// # Errors
    ///
    /// `RegistrationError::AlreadySubmitting` if another submission is pending,
    /// `RegistrationError::Server` for non-success statuses, or
    /// `RegistrationError::Network` if the request could not be completed.
    pub async fn submit(&self, form: &RegistrationForm) -> Result<Notice, RegistrationError> {
        let _in_flight =
            InFlight::acquire(&self.in_flight).ok_or(RegistrationError::AlreadySubmitting)?;

        let url = self.url();
        log::info!("Submitting registration for {} to {}", form.email(), url);

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(form)
            .send()
            .await
            .map_err(|e| {
                log::error!("Failed to reach registration endpoint {}: {}", url, e);
                RegistrationError::Network(e)
            })?;

        let status = response.status();
        let reply = match response.json::<ServerReply>().await {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!("Registration reply ({}) was not valid JSON: {}", status, e);
                ServerReply::default()
            }
        };

        if status.is_success() {
            let message = reply.message().unwrap_or(DEFAULT_SUCCESS_MESSAGE);
            log::info!("Registration accepted ({})", status);
            Ok(Notice::success(message))
        } else {
            let message = reply
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("Error: {}", status.as_u16()));
            log::warn!("Registration rejected ({}): {}", status, message);
            Err(RegistrationError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }
}
