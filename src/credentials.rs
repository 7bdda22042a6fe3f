use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::transport::WireFormat;

/// Production endpoint used when no `uri` is supplied.
pub const DEFAULT_SERVER_URL: &str = "https://myadminapi.geotab.com/v2/MyAdminApi.ashx";

/// Construction input for [`crate::MyAdminApiClient`].
///
/// Every field is optional here; [`ClientOptions::validate`] enforces which
/// combinations are acceptable.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientOptions {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub wire_format: WireFormat,
}

impl ClientOptions {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            ..Default::default()
        }
    }

    pub fn with_session(mut self, api_key: impl Into<String>, session_id: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn with_wire_format(mut self, format: WireFormat) -> Self {
        self.wire_format = format;
        self
    }

    /// Checks required fields and resolves the server url.
    ///
    /// A password may be omitted only when both `api_key` and `session_id`
    /// are supplied. Empty strings count as missing.
    pub fn validate(self) -> Result<(String, Credentials), ClientError> {
        let username = non_empty(self.username)
            .ok_or_else(|| ClientError::Validation("Must supply username".to_string()))?;
        let password = non_empty(self.password);
        let api_key = non_empty(self.api_key);
        let session_id = non_empty(self.session_id);

        if password.is_none() && (api_key.is_none() || session_id.is_none()) {
            return Err(ClientError::Validation(
                "Must supply password OR sessionId and apiKey".to_string(),
            ));
        }

        let server_url = non_empty(self.uri).unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        Ok((
            server_url,
            Credentials {
                username,
                password,
                api_key,
                session_id,
            },
        ))
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("api_key", &self.api_key)
            .field("session_id", &self.session_id)
            .field("uri", &self.uri)
            .field("wire_format", &self.wire_format)
            .finish()
    }
}

/// Session credentials held by a client.
#[derive(Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
    pub api_key: Option<String>,
    pub session_id: Option<String>,
}

impl Credentials {
    /// True once either half of the session pair is known.
    pub fn has_session(&self) -> bool {
        self.api_key.is_some() || self.session_id.is_some()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("api_key", &self.api_key)
            .field("session_id", &self.session_id)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
