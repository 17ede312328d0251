//! Mapping chain resolutions onto HTTP responses.
//!
//! # Design Decisions
//! - Redirects are always 303 See Other so the client re-requests with GET
//! - The target URL is copied verbatim into `Location`
//! - A URL that is not a legal header value yields 500, not a panic

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::routing::Resolution;

/// Body of a not-found response.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

impl IntoResponse for Resolution {
    fn into_response(self) -> Response {
        match self {
            Resolution::Redirect { location } => {
                (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
            }
            Resolution::Content(body) => (StatusCode::OK, body).into_response(),
            Resolution::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_response() {
        let response = Resolution::redirect("https://example.org/a?b=c").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://example.org/a?b=c"
        );
    }

    #[test]
    fn test_content_and_not_found() {
        let response = Resolution::Content("hi".into()).into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = Resolution::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_illegal_location_is_server_error() {
        let response = Resolution::redirect("https://x\r\nSet-Cookie: a=b").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
