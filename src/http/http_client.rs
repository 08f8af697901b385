use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use log::{debug, warn};
use reqwest::{Method, StatusCode, header::CONTENT_TYPE};
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::{
    error::HttpError,
    middleware::{AuthMiddleware, SessionResetMiddleware, TokenRotationMiddleware},
    notifier::{DEFAULT_ERROR_MESSAGE, LogNotifier, Notifier},
    types::{Envelope, RequestBody, RequestDescriptor},
};
use crate::{
    codec::{self, BigIntMode},
    session::{BearerToken, DEFAULT_BEARER_TOKEN, SessionStore},
};

pub const DEFAULT_TIMEOUT_SECS: u64 = 100;

/// Tunables of [`HttpClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub bearer_token: BearerToken,
    pub send_refresh_token: bool,
    pub big_int_mode: BigIntMode,
    /// Ask the notifier for login navigation after a 401.
    pub redirect_on_unauthorized: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            bearer_token: DEFAULT_BEARER_TOKEN,
            send_refresh_token: true,
            big_int_mode: BigIntMode::default(),
            redirect_on_unauthorized: true,
        }
    }
}

/// HTTP client every API call funnels through.
///
/// Bodies are encoded and responses decoded with the precision-safe codec, so
/// identifiers wider than 53 bits never pass through a float. Authentication,
/// token rotation and session reset run as middleware stages around the
/// transport; failure reporting runs here once the body is decoded.
///
/// Each call is attempted exactly once. The client is cheap to share behind an
/// `Arc` and calls may be issued concurrently.
pub struct HttpClient {
    base_url: Url,
    client: ClientWithMiddleware,
    session: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    big_int_mode: BigIntMode,
}

impl HttpClient {
    pub fn new(base_url: Url, session: Arc<SessionStore>) -> Result<Self, HttpError> {
        Self::with_options(base_url, session, Arc::new(LogNotifier), ClientOptions::default())
    }

    pub fn with_options(
        mut base_url: Url,
        session: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
        options: ClientOptions,
    ) -> Result<Self, HttpError> {
        // Relative joins must append to the base path rather than replace it.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let inner_client = reqwest::Client::builder().timeout(options.timeout).build()?;

        let client = reqwest_middleware::ClientBuilder::new(inner_client)
            .with(AuthMiddleware::new(
                session.clone(),
                options.bearer_token,
                options.send_refresh_token,
            ))
            .with(SessionResetMiddleware::new(
                session.clone(),
                notifier.clone(),
                options.redirect_on_unauthorized,
            ))
            .with(TokenRotationMiddleware::new(session.clone()))
            .build();

        Ok(Self {
            base_url,
            client,
            session,
            notifier,
            big_int_mode: options.big_int_mode,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn big_int_mode(&self) -> BigIntMode {
        self.big_int_mode
    }

    /// Sends one request and returns the decoded response body.
    ///
    /// The result is the response envelope as JSON, or the raw text as a JSON
    /// string when the body is not JSON. Non-2xx responses and transport
    /// failures are reported to the notifier and returned as errors; a 401
    /// has cleared the session by the time the error is returned.
    pub async fn send(&self, descriptor: RequestDescriptor) -> Result<Value, HttpError> {
        let result = self.dispatch(descriptor).await;
        if let Err(e) = &result {
            self.report(e);
        }
        result
    }

    /// Like [`HttpClient::send`], with the body deserialized into an envelope.
    /// A body that does not fit the envelope is reported like any other failure.
    pub async fn send_json<T: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> Result<Envelope<T>, HttpError> {
        let body = self.send(descriptor).await?;
        serde_json::from_value(body).map_err(|e| {
            let error = HttpError::from(e);
            self.report(&error);
            error
        })
    }

    async fn dispatch(&self, descriptor: RequestDescriptor) -> Result<Value, HttpError> {
        let RequestDescriptor {
            method,
            path,
            query,
            body,
            headers,
        } = descriptor;

        if ![Method::GET, Method::POST, Method::PUT, Method::DELETE].contains(&method) {
            return Err(HttpError::UnsupportedMethod(method));
        }

        let url = self.endpoint(&path)?;
        let mut req = self.client.request(method.clone(), url.clone());
        if !query.is_empty() {
            req = req.query(&query);
        }
        req = req.headers(headers);
        match body {
            Some(RequestBody::Json(value)) => {
                let text = codec::encode(&value, self.big_int_mode)?;
                req = req.header(CONTENT_TYPE, "application/json").body(text);
            },
            Some(RequestBody::Multipart(form)) => {
                req = req.multipart(form);
            },
            None => {},
        }

        let start = Instant::now();
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        debug!(
            method:% = method,
            url:% = url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64;
            "HTTP request completed"
        );

        let payload = codec::decode(&text, self.big_int_mode);
        if status.is_success() {
            return Ok(payload);
        }

        let message = failure_message(&payload);
        if status == StatusCode::UNAUTHORIZED {
            Err(HttpError::Unauthorized { message })
        } else {
            Err(HttpError::ServerError {
                status,
                message,
                body: payload,
            })
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, HttpError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn report(&self, error: &HttpError) {
        let message = match error {
            HttpError::Unauthorized { message } | HttpError::ServerError { message, .. } => message.as_str(),
            _ => DEFAULT_ERROR_MESSAGE,
        };
        warn!(error:% = error; "HTTP request failed");
        self.notifier.warning(message);
    }
}

/// User-facing message for a failed response: the envelope's `msg` when it
/// has one, the generic fallback otherwise.
pub fn failure_message(payload: &Value) -> String {
    ["msg", "message"]
        .iter()
        .filter_map(|key| payload.get(key).and_then(Value::as_str))
        .find(|msg| !msg.trim().is_empty())
        .unwrap_or(DEFAULT_ERROR_MESSAGE)
        .to_string()
}
