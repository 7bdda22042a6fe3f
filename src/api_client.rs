use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::credentials::{ClientOptions, Credentials};
use crate::dto::{AuthenticateRequest, AuthenticateResponse, JsonRpcRequest, JsonRpcResponse};
use crate::error::{ClientError, ErrorRecord};
use crate::transport::{HttpRequest, HttpTransport, Transport, WireFormat, TRANSPORT_ERROR_NAME};

const AUTHENTICATE_METHOD: &str = "Authenticate";

/// Session-carrying client for the MyAdmin JSON-RPC API.
///
/// Construct it, call [`authenticate`](Self::authenticate) once, then issue
/// any number of [`call`](Self::call)s. Every failure is returned as a
/// [`ClientError`]; remote and transport failures expose an
/// [`ErrorRecord`] through [`ClientError::record`].
pub struct MyAdminApiClient<T = HttpTransport> {
    transport: T,
    server_url: String,
    wire_format: WireFormat,
    credentials: Credentials,
}

impl MyAdminApiClient<HttpTransport> {
    /// Create a client backed by the default HTTP transport.
    pub fn new(options: ClientOptions) -> Result<Self, ClientError> {
        Self::with_transport(options, HttpTransport::new())
    }
}

impl<T: Transport> MyAdminApiClient<T> {
    /// Create a client that sends its requests through `transport`.
    pub fn with_transport(options: ClientOptions, transport: T) -> Result<Self, ClientError> {
        let wire_format = options.wire_format;
        let (server_url, credentials) = options.validate()?;

        Ok(Self {
            transport,
            server_url,
            wire_format,
            credentials,
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// How request envelopes are placed in the POST body.
    pub fn wire_format(&self) -> WireFormat {
        self.wire_format
    }

    /// Authenticate with the stored username and password.
    ///
    /// On success the returned `userId` and `sessionId` become the session
    /// credentials for every later call. The raw result is returned as is.
    pub async fn authenticate(&mut self) -> Result<Value, ClientError> {
        let password = self.credentials.password.clone().ok_or_else(|| {
            ClientError::Validation("Must supply password to authenticate".to_string())
        })?;

        let request = AuthenticateRequest {
            username: self.credentials.username.clone(),
            password,
        };
        let result = self
            .post(AUTHENTICATE_METHOD, serde_json::to_value(request)?)
            .await?;

        let session: AuthenticateResponse = serde_json::from_value(result.clone())
            .map_err(|e| {
                ClientError::InvalidResponse(format!("Authenticate result missing session: {e}"))
            })?;

        self.credentials.api_key = Some(session.user_id);
        self.credentials.session_id = Some(session.session_id);
        info!("Authenticated as {}", self.credentials.username);

        Ok(result)
    }

    /// Authenticate unless the client can run on a pre-supplied session.
    ///
    /// A client built without a password but with both `apiKey` and
    /// `sessionId` skips the round-trip and returns `None`. Every other
    /// client authenticates and returns the raw result.
    pub async fn ensure_authenticated(&mut self) -> Result<Option<Value>, ClientError> {
        if self.credentials.password.is_none() && self.credentials.has_session() {
            debug!("Reusing supplied session for {}", self.credentials.username);
            return Ok(None);
        }
        self.authenticate().await.map(Some)
    }

    /// Issue `method` with the current session credentials merged into
    /// `params`.
    ///
    /// `apiKey` and `sessionId` always override same-named keys in `params`.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, ClientError> {
        if !self.credentials.has_session() {
            return Err(ClientError::AuthenticationRequired);
        }
        if method.is_empty() {
            return Err(ClientError::InvalidArgument("Must provide method".to_string()));
        }

        let mut params = match params {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(ClientError::InvalidArgument(
                    "params must be a JSON object".to_string(),
                ))
            }
        };
        params.insert("apiKey".to_string(), optional_string(&self.credentials.api_key));
        params.insert(
            "sessionId".to_string(),
            optional_string(&self.credentials.session_id),
        );

        self.post(method, Value::Object(params)).await
    }

    /// Like [`call`](Self::call), deserializing the result into `U`.
    pub async fn call_as<U>(&self, method: &str, params: Option<Value>) -> Result<U, ClientError>
    where
        U: DeserializeOwned,
    {
        let result = self.call(method, params).await?;
        serde_json::from_value(result)
            .map_err(|e| ClientError::InvalidResponse(format!("{method} result: {e}")))
    }

    /// Send one RPC envelope and map the response.
    ///
    /// No credentials are added here; `params` is sent as given.
    pub async fn post(&self, method: &str, params: Value) -> Result<Value, ClientError> {
        let envelope = JsonRpcRequest::new(method, params);
        let request = HttpRequest {
            url: self.server_url.clone(),
            format: self.wire_format,
            payload: serde_json::to_string(&envelope)?,
        };

        debug!("MyAdmin request: method={:?} url={}", method, self.server_url);
        let response = self.transport.send(request).await?;
        debug!("MyAdmin response: status={} method={:?}", response.status, method);

        let parsed = JsonRpcResponse::from_body(&response.body);

        if let Ok(data) = &parsed {
            if let Some(record) = data.application_error() {
                debug!("MyAdmin application error: {}", record);
                return Err(ClientError::Remote(record));
            }
        }

        if !response.is_success() {
            return Err(ClientError::Transport(ErrorRecord {
                code: Some(i64::from(response.status)),
                message: response.status_text,
                name: TRANSPORT_ERROR_NAME.to_string(),
            }));
        }

        parsed
            .map(JsonRpcResponse::into_result)
            .map_err(|e| ClientError::InvalidResponse(format!("{method} response body: {e}")))
    }

    /// Alias of [`authenticate`](Self::authenticate), kept for callers of the
    /// older naming.
    pub async fn authenticate_async(&mut self) -> Result<Value, ClientError> {
        self.authenticate().await
    }

    /// Alias of [`call`](Self::call).
    pub async fn call_async(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> Result<Value, ClientError> {
        self.call(method, params).await
    }
}

fn optional_string(value: &Option<String>) -> Value {
    value.clone().map(Value::String).unwrap_or(Value::Null)
}
