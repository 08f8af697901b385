//! Request and response stages wrapped around the transport.
//!
//! Each concern the client has besides moving bytes lives in its own stage so
//! it can be exercised on its own:
//!
//! - [`AuthMiddleware`] attaches the session credential to outgoing requests.
//! - [`TokenRotationMiddleware`] picks up tokens the gateway rotated in place.
//! - [`SessionResetMiddleware`] wipes the session when the backend answers 401.

use std::sync::Arc;

use async_trait::async_trait;
use http::Extensions;
use log::{debug, warn};
use reqwest::{
    Request,
    Response,
    StatusCode,
    header::{AUTHORIZATION, HeaderName, HeaderValue},
};
use reqwest_middleware::{Middleware, Next};

use super::notifier::Notifier;
use crate::session::{BearerToken, SessionStore};

/// Header carrying the refresh token in both directions.
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";

const BEARER_PREFIX: &str = "Bearer ";

fn sensitive_header(value: &str) -> reqwest_middleware::Result<HeaderValue> {
    let mut value = HeaderValue::from_str(value).map_err(|e| reqwest_middleware::Error::Middleware(e.into()))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Adds `Authorization: Bearer <token>` while a session exists.
///
/// An `Authorization` header set explicitly on the request is left untouched.
pub struct AuthMiddleware {
    session: Arc<SessionStore>,
    token: BearerToken,
    send_refresh_token: bool,
}

impl AuthMiddleware {
    pub fn new(session: Arc<SessionStore>, token: BearerToken, send_refresh_token: bool) -> Self {
        Self {
            session,
            token,
            send_refresh_token,
        }
    }
}

#[async_trait]
impl Middleware for AuthMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        if let Some(credential) = self.session.get().await {
            if !req.headers().contains_key(AUTHORIZATION) &&
                let Some(token) = credential.bearer(self.token)
            {
                let value = sensitive_header(&format!("{BEARER_PREFIX}{token}"))?;
                req.headers_mut().insert(AUTHORIZATION, value);
            }
            if self.send_refresh_token && !credential.refresh_token.is_empty() {
                let value = sensitive_header(&credential.refresh_token)?;
                req.headers_mut()
                    .insert(HeaderName::from_static(REFRESH_TOKEN_HEADER), value);
            }
        }
        next.run(req, extensions).await
    }
}

/// Stores tokens the gateway hands back after refreshing an expired access
/// token on the caller's behalf.
pub struct TokenRotationMiddleware {
    session: Arc<SessionStore>,
}

impl TokenRotationMiddleware {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }
}

#[async_trait]
impl Middleware for TokenRotationMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let response = next.run(req, extensions).await?;
        if !response.status().is_success() {
            return Ok(response);
        }

        let headers = response.headers();
        let access_token = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix(BEARER_PREFIX))
            .map(str::to_string);
        let refresh_token = headers
            .get(REFRESH_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if let Some(access_token) = access_token {
            let current = self.session.get().await;
            if current.is_some_and(|c| c.access_token != access_token) &&
                self.session.rotate_tokens(access_token, refresh_token).await
            {
                debug!(url:% = response.url(); "Picked up rotated access token");
            }
        }
        Ok(response)
    }
}

/// Clears the session when the backend rejects the credential.
pub struct SessionResetMiddleware {
    session: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    redirect_to_login: bool,
}

impl SessionResetMiddleware {
    pub fn new(session: Arc<SessionStore>, notifier: Arc<dyn Notifier>, redirect_to_login: bool) -> Self {
        Self {
            session,
            notifier,
            redirect_to_login,
        }
    }
}

#[async_trait]
impl Middleware for SessionResetMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let response = next.run(req, extensions).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(url:% = response.url(); "Unauthorized response, clearing session");
            self.session.clear().await;
            if self.redirect_to_login {
                self.notifier.login_required();
            }
        }
        Ok(response)
    }
}
