use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::debug;

use crate::config;
use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::repos;

/// Authenticated user context resolved from the session cookie
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i64,
    pub session_id: i64,
}

/// Session authentication middleware: resolves the session cookie against
/// the sessions table and injects `AuthUser` into request extensions.
pub async fn session_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_cookie(&headers)
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    let pool = DatabaseManager::pool().await?;
    let session = repos::sessions::find_by_token(&pool, &token)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid session"))?;

    if session.is_expired(Utc::now()) {
        debug!(session_id = session.id, "Rejected expired session");
        return Err(ApiError::unauthorized("Session expired"));
    }

    request.extensions_mut().insert(AuthUser {
        user_id: session.user_id,
        session_id: session.id,
    });

    Ok(next.run(request).await)
}

/// Pull the session token out of the Cookie header, if present
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let cookie_name = config::config().session.cookie_name.as_str();
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;

    raw.split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .map(|(_, value)| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_session_cookie_among_others() {
        let headers = headers_with_cookie(
            "theme=dark; authenticated_session=session_abc123; locale=en",
        );
        assert_eq!(
            session_cookie(&headers).as_deref(),
            Some("session_abc123")
        );
    }

    #[test]
    fn missing_cookie_header_yields_none() {
        assert_eq!(session_cookie(&HeaderMap::new()), None);
    }

    #[test]
    fn other_cookies_do_not_match() {
        let headers = headers_with_cookie("authenticated_session_old=zzz; theme=dark");
        assert_eq!(session_cookie(&headers), None);
    }
}
