// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

pub const PROBLEM_MEDIA_TYPE: &str = "application/problem+json";

/// RFC 7807 problem details
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub detail: Option<String>,
}

impl From<&Error> for ProblemDetails {
    fn from(e: &Error) -> Self {
        let status = e.status_code();

        Self {
            r#type: "about:blank".to_string(),
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            status: status.as_u16(),
            detail: Some(e.to_string()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let problem = ProblemDetails::from(&self);

        let body = match serde_json::to_vec(&problem) {
            Ok(b) => b,
            Err(e) => {
                tracing::error!(error = %e, "encoding problem details");
                Vec::new()
            }
        };

        (
            self.status_code(),
            [(CONTENT_TYPE, PROBLEM_MEDIA_TYPE)],
            body,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn error_renders_as_problem() {
        let res = Error::NonceMismatch("nonce does not match".into()).into_response();

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(res.headers()[CONTENT_TYPE], PROBLEM_MEDIA_TYPE);

        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let p: ProblemDetails = serde_json::from_slice(&body).unwrap();

        assert_eq!(
            p,
            ProblemDetails {
                r#type: "about:blank".into(),
                title: "Forbidden".into(),
                status: 403,
                detail: Some("Nonce mismatch: nonce does not match".into()),
            }
        );
    }

    #[test]
    fn absent_detail_is_omitted() {
        let p = ProblemDetails {
            r#type: "about:blank".into(),
            title: "Not Found".into(),
            status: 404,
            detail: None,
        };

        let j = serde_json::to_value(&p).unwrap();

        assert_eq!(
            j,
            serde_json::json!({ "type": "about:blank", "title": "Not Found", "status": 404 })
        );
    }
}
