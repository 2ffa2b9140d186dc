// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Proxy attestation server.
//!
//! A device that wants a client certificate first opens a session and
//! receives a nonce.  It then submits a platform attestation token (Arm PSA
//! or AWS Nitro) together with a PKCS#10 CSR.  The token must echo the nonce
//! and carry the SHA-256 of the CSR.  The proxy has the token appraised by a
//! Veraison verifier, checks those bindings and the CSR's self-signature, and
//! only then issues a 24-hour certificate carrying the attested measurement
//! in a dedicated extension.
//!
//! The crate provides:
//! * A session store issuing single-use, expiring challenges ([`session`])
//! * Typed extraction of PSA and Nitro evidence from an appraisal ([`evidence`])
//! * A client for the external verification service ([`verifier`])
//! * CSR handling and certificate synthesis ([`ca`])
//! * The protocol orchestrator and its HTTP API ([`proxy`])

pub mod base64;
pub mod ca;
pub mod config;
pub mod evidence;
pub mod proxy;
pub mod session;
pub mod verifier;

#[cfg(test)]
mod testutil;
