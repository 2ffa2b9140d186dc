// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use axum::http::StatusCode;

/// Every way an attestation request can fail.  Any of these aborts the
/// request; no certificate is ever returned alongside an error.
#[derive(thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Session storage error: {0}")]
    Storage(String),
    #[error("Verifier error: {0}")]
    Verifier(String),
    #[error("Attestation not trusted: {0}")]
    AttestationNotTrusted(String),
    #[error("Malformed evidence: {0}")]
    MalformedEvidence(String),
    #[error("Nonce mismatch: {0}")]
    NonceMismatch(String),
    #[error("CSR binding error: {0}")]
    CsrBinding(String),
    #[error("Invalid CSR signature: {0}")]
    InvalidCsrSignature(String),
    #[error("Certificate synthesis error: {0}")]
    CertificateSynthesis(String),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedRequest(e)
            | Error::NotFound(e)
            | Error::Storage(e)
            | Error::Verifier(e)
            | Error::AttestationNotTrusted(e)
            | Error::MalformedEvidence(e)
            | Error::NonceMismatch(e)
            | Error::CsrBinding(e)
            | Error::InvalidCsrSignature(e)
            | Error::CertificateSynthesis(e) => {
                write!(f, "{}", e)
            }
        }
    }
}

impl Error {
    /// HTTP status reported for this error.  Failures caused by what the
    /// caller submitted are 4xx; failures of the proxy or of the verifier are
    /// 5xx.
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Error::MalformedRequest(_) | Error::InvalidCsrSignature(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::AttestationNotTrusted(_) | Error::NonceMismatch(_) | Error::CsrBinding(_) => {
                StatusCode::FORBIDDEN
            }
            Error::MalformedEvidence(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Verifier(_) => StatusCode::BAD_GATEWAY,
            Error::Storage(_) | Error::CertificateSynthesis(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl From<crate::session::Error> for Error {
    fn from(e: crate::session::Error) -> Self {
        match e {
            crate::session::Error::NotFound(m) => Error::NotFound(m),
            crate::session::Error::Storage(m) => Error::Storage(m),
        }
    }
}

impl From<crate::evidence::Error> for Error {
    fn from(e: crate::evidence::Error) -> Self {
        Error::MalformedEvidence(e.to_string())
    }
}

impl From<crate::verifier::Error> for Error {
    fn from(e: crate::verifier::Error) -> Self {
        Error::Verifier(e.to_string())
    }
}
