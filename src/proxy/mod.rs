// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! The proxy module sequences the challenge-response protocol: it issues
//! sessions, forwards attestation tokens to the verifier, checks that the
//! resulting evidence is bound to both the session nonce and the caller's
//! CSR, and finally asks the CA to mint a certificate.
//!
//! [`Proxy`] is transport-agnostic; [`router`] exposes it over HTTP.

pub use self::errors::Error;
pub use self::http::router;
pub use self::http::CHALLENGE_RESPONSE_SESSION_MEDIA_TYPE;
pub use self::problem::ProblemDetails;
pub use self::proxy::AttestationRequest;
pub use self::proxy::Challenge;
pub use self::proxy::Proxy;

pub mod binding;
mod errors;
mod http;
mod problem;
#[allow(clippy::module_inception)]
mod proxy;
