// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::proxy::{AttestationRequest, Proxy};
use crate::evidence::Platform;
use crate::session::SessionId;
use axum::extract::multipart::{Field, MultipartRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;

pub const CHALLENGE_RESPONSE_SESSION_MEDIA_TYPE: &str =
    "application/vnd.veraison.challenge-response-session+json";

const TOKEN_FIELD: &str = "token";
const CSR_FIELD: &str = "csr";

/// Build the proxy API:
///
/// * `POST /proxy/v1/Start` opens a session.  201, `Location` is the session
///   id and the body is the raw nonce.
/// * `POST /proxy/v1/PSA/{session-id}` and `POST /proxy/v1/Nitro/{session-id}`
///   take a multipart form with base64 `token` and `csr` fields.  200, the
///   body is the issued certificate DER followed by the CA certificate DER.
///
/// Failures are reported as `application/problem+json`.
pub fn router(proxy: Proxy) -> Router {
    Router::new()
        .route("/proxy/v1/Start", post(start))
        .route("/proxy/v1/PSA/:id", post(attest_psa))
        .route("/proxy/v1/Nitro/:id", post(attest_nitro))
        .layer(TraceLayer::new_for_http())
        .with_state(proxy)
}

async fn start(State(proxy): State<Proxy>) -> Result<Response, Error> {
    let c = proxy.start()?;

    Ok((
        StatusCode::CREATED,
        [
            (LOCATION, c.session_id.to_string()),
            (CONTENT_TYPE, CHALLENGE_RESPONSE_SESSION_MEDIA_TYPE.to_string()),
        ],
        c.nonce,
    )
        .into_response())
}

async fn attest_psa(
    State(proxy): State<Proxy>,
    Path(id): Path<String>,
    form: Result<Multipart, MultipartRejection>,
) -> Result<Response, Error> {
    attest(proxy, Platform::Psa, &id, form).await
}

async fn attest_nitro(
    State(proxy): State<Proxy>,
    Path(id): Path<String>,
    form: Result<Multipart, MultipartRejection>,
) -> Result<Response, Error> {
    attest(proxy, Platform::Nitro, &id, form).await
}

async fn attest(
    proxy: Proxy,
    platform: Platform,
    id: &str,
    form: Result<Multipart, MultipartRejection>,
) -> Result<Response, Error> {
    let session_id = SessionId::parse_str(id)
        .map_err(|e| Error::MalformedRequest(format!("session id {id:?}: {e}")))?;

    let form = form.map_err(|e| Error::MalformedRequest(e.body_text()))?;

    let (token, csr) = read_form(form).await?;

    let req = AttestationRequest {
        session_id,
        platform,
        token,
        csr,
    };

    let certs = proxy.attest(&req).await?;

    Ok((
        StatusCode::OK,
        [(CONTENT_TYPE, CHALLENGE_RESPONSE_SESSION_MEDIA_TYPE)],
        certs,
    )
        .into_response())
}

/// Pull the base64 `token` and `csr` fields out of the form.  Other fields are
/// ignored; a repeated field keeps its last value.
async fn read_form(mut form: Multipart) -> Result<(Vec<u8>, Vec<u8>), Error> {
    let mut token = None;
    let mut csr = None;

    while let Some(field) = form
        .next_field()
        .await
        .map_err(|e| Error::MalformedRequest(format!("reading form: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            TOKEN_FIELD => token = Some(decode_field(TOKEN_FIELD, field).await?),
            CSR_FIELD => csr = Some(decode_field(CSR_FIELD, field).await?),
            _ => {}
        }
    }

    let token = token.ok_or_else(|| missing(TOKEN_FIELD))?;
    let csr = csr.ok_or_else(|| missing(CSR_FIELD))?;

    Ok((token, csr))
}

async fn decode_field(name: &str, field: Field<'_>) -> Result<Vec<u8>, Error> {
    let text = field
        .text()
        .await
        .map_err(|e| Error::MalformedRequest(format!("reading {name}: {e}")))?;

    let v = crate::base64::decode_str(text.trim())
        .map_err(|e| Error::MalformedRequest(format!("decoding {name}: {e}")))?;

    if v.is_empty() {
        return Err(Error::MalformedRequest(format!("{name} is empty")));
    }

    Ok(v)
}

fn missing(name: &str) -> Error {
    Error::MalformedRequest(format!("missing form field {name}"))
}
