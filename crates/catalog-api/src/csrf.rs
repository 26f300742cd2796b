//! # CSRF Origin Check
//!
//! Unsafe requests must come from the serving host or a trusted origin,
//! unless their path sits under an exempt prefix. The JSON API is exempt by
//! default; the HTML forms are not.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method, Uri, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Path prefixes that skip the check by default
pub const DEFAULT_EXEMPT_PREFIXES: [&str; 2] = ["/categories/", "/products/"];

/// Which routes are checked and which origins are accepted
#[derive(Debug, Clone)]
pub struct CsrfPolicy {
    exempt_prefixes: Vec<String>,
    trusted_origins: Vec<String>,
}

impl CsrfPolicy {
    pub fn new(exempt_prefixes: Vec<String>, trusted_origins: Vec<String>) -> Self {
        let trusted_origins = trusted_origins
            .into_iter()
            .map(|origin| origin.trim_end_matches('/').to_ascii_lowercase())
            .collect();
        Self {
            exempt_prefixes,
            trusted_origins,
        }
    }

    /// Default exemptions plus the given trusted origins
    pub fn with_trusted_origins(trusted_origins: Vec<String>) -> Self {
        Self::new(
            DEFAULT_EXEMPT_PREFIXES.iter().map(|p| p.to_string()).collect(),
            trusted_origins,
        )
    }

    pub fn is_exempt(&self, path: &str) -> bool {
        self.exempt_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Decide whether a request may proceed.
    pub fn allows(&self, method: &Method, path: &str, headers: &HeaderMap) -> bool {
        if is_safe(method) || self.is_exempt(path) {
            return true;
        }

        let Some(origin) = request_origin(headers) else {
            return false;
        };

        if let Some(host) = header_str(headers, header::HOST) {
            let host = host.to_ascii_lowercase();
            if origin == format!("http://{host}") || origin == format!("https://{host}") {
                return true;
            }
        }

        self.trusted_origins.contains(&origin)
    }
}

impl Default for CsrfPolicy {
    fn default() -> Self {
        Self::with_trusted_origins(Vec::new())
    }
}

/// Middleware rejecting cross-origin form posts with 403
pub async fn verify_origin(
    State(policy): State<Arc<CsrfPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    if policy.allows(request.method(), request.uri().path(), request.headers()) {
        return next.run(request).await;
    }

    tracing::warn!(
        method = %request.method(),
        path = %request.uri().path(),
        origin = ?request_origin(request.headers()),
        "Rejected cross-origin request"
    );
    ApiError::CsrfRejected.into_response()
}

fn is_safe(method: &Method) -> bool {
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE
    )
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// `Origin`, or the origin part of `Referer` when the browser sent none
fn request_origin(headers: &HeaderMap) -> Option<String> {
    if let Some(origin) = header_str(headers, header::ORIGIN).filter(|o| *o != "null") {
        return Some(origin.trim_end_matches('/').to_ascii_lowercase());
    }

    let referer: Uri = header_str(headers, header::REFERER)?.parse().ok()?;
    let scheme = referer.scheme_str()?;
    let authority = referer.authority()?;
    Some(format!("{scheme}://{authority}").to_ascii_lowercase())
}
