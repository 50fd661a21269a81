//! CORS headers attached to every response.

use axum::Router;
use axum::http::header::{self, HeaderName, HeaderValue, InvalidHeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

/// Value of `Access-Control-Allow-Methods`.
pub const ALLOW_METHODS: &str = "OPTIONS,PUT";

/// Value of `Access-Control-Allow-Headers`.
pub const ALLOW_HEADERS: &str = "Content-Type,Accept";

/// Fixed CORS header set for the order endpoint.
///
/// Unlike a preflight-only CORS layer, the headers are written on every
/// response, including errors and 405s, whether or not the request carried
/// an `Origin` header.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allow_origin: HeaderValue,
}

impl CorsPolicy {
    /// Creates a policy allowing `origin`.
    pub fn new(origin: &str) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            allow_origin: HeaderValue::from_str(origin)?,
        })
    }

    /// Returns the header set in a fixed order.
    pub fn headers(&self) -> [(HeaderName, HeaderValue); 4] {
        [
            (
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                self.allow_origin.clone(),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOW_METHODS),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(ALLOW_HEADERS),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            ),
        ]
    }

    /// Wraps every route of `router` so its responses carry the header set.
    pub fn apply(&self, router: Router) -> Router {
        self.headers()
            .into_iter()
            .fold(router, |router, (name, value)| {
                router.layer(SetResponseHeaderLayer::overriding(name, value))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_use_configured_origin() {
        let policy = CorsPolicy::new("https://shop.example.com").unwrap();
        let headers = policy.headers();

        assert_eq!(headers[0].0, header::ACCESS_CONTROL_ALLOW_ORIGIN);
        assert_eq!(headers[0].1, "https://shop.example.com");
        assert_eq!(headers[1].1, "OPTIONS,PUT");
        assert_eq!(headers[2].1, "Content-Type,Accept");
        assert_eq!(headers[3].1, "true");
    }

    #[test]
    fn test_rejects_origin_with_control_characters() {
        assert!(CorsPolicy::new("https://evil.example.com\r\nSet-Cookie: x").is_err());
    }
}
