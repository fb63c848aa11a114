//! Registration form body and the endpoint's JSON reply.

use serde::{Deserialize, Serialize};

/// The four fields of the registration form.
///
/// Serialized with the field names the registration endpoint expects.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationForm {
    #[serde(rename = "nombre_completo")]
    full_name: String,
    email: String,
    #[serde(rename = "telefono")]
    phone: String,
    #[serde(rename = "contrasena")]
    password: String,
}

impl RegistrationForm {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            phone: phone.into(),
            password: password.into(),
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// Keeps the password out of logs and panic messages.
impl std::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// JSON body returned by the registration endpoint.
///
/// Only `message` is used; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerReply {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ServerReply {
    /// The reply message, if present and non-empty.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }
}
