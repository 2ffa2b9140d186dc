// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::binding;
use super::errors::Error;
use crate::ca::{self, CaIdentity};
use crate::evidence::{Evidence, Platform};
use crate::session::{ISessionStore, SessionId};
use crate::verifier::{Appraisal, IVerifier};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TENANT_ID: &str = "0";
const DEFAULT_VERIFIER_TIMEOUT: Duration = Duration::from_secs(10);

/// A freshly issued challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub session_id: SessionId,
    pub nonce: Vec<u8>,
}

/// Everything an attester submits to close a session
#[derive(Debug, Clone)]
pub struct AttestationRequest {
    pub session_id: SessionId,
    pub platform: Platform,
    /// Opaque platform attestation token, forwarded as-is to the verifier
    pub token: Vec<u8>,
    /// DER-encoded PKCS#10 certificate signing request
    pub csr: Vec<u8>,
}

/// The attestation proxy.  Cheap to share: all state lives behind `Arc`s
/// and every dependency is internally synchronised.
#[derive(Clone)]
pub struct Proxy {
    sessions: Arc<dyn ISessionStore>,
    verifier: Arc<dyn IVerifier>,
    ca: Arc<CaIdentity>,
    tenant_id: String,
    verifier_timeout: Duration,
}

impl Proxy {
    pub fn new(
        sessions: Arc<dyn ISessionStore>,
        verifier: Arc<dyn IVerifier>,
        ca: Arc<CaIdentity>,
    ) -> Self {
        Self {
            sessions,
            verifier,
            ca,
            tenant_id: DEFAULT_TENANT_ID.to_string(),
            verifier_timeout: DEFAULT_VERIFIER_TIMEOUT,
        }
    }

    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = tenant_id.into();
        self
    }

    pub fn with_verifier_timeout(mut self, timeout: Duration) -> Self {
        self.verifier_timeout = timeout;
        self
    }

    pub fn ca(&self) -> &CaIdentity {
        &self.ca
    }

    /// Open a new session and return its challenge
    pub fn start(&self) -> Result<Challenge, Error> {
        let session_id = self.sessions.create_session()?;
        let session = self.sessions.get_session(&session_id)?;

        tracing::info!(%session_id, "session started");
        tracing::debug!(%session_id, nonce = %hex::encode(&session.nonce));

        Ok(Challenge {
            session_id,
            nonce: session.nonce,
        })
    }

    /// Close the session named in `req`.  On success, returns the DER of the
    /// newly issued certificate immediately followed by the DER of the CA
    /// certificate.
    ///
    /// The session is consumed before anything else happens, so a second
    /// submission against the same session fails with [`Error::NotFound`]
    /// whatever the outcome of the first.
    #[tracing::instrument(
        name = "attest",
        skip_all,
        fields(session_id = %req.session_id, platform = %req.platform)
    )]
    pub async fn attest(&self, req: &AttestationRequest) -> Result<Vec<u8>, Error> {
        match self.try_attest(req).await {
            Ok(v) => {
                tracing::info!("certificate issued");
                Ok(v)
            }
            Err(e) if e.is_client_error() => {
                tracing::warn!(error = %e, "attestation refused");
                Err(e)
            }
            Err(e) => {
                tracing::error!(error = %e, "attestation failed");
                Err(e)
            }
        }
    }

    async fn try_attest(&self, req: &AttestationRequest) -> Result<Vec<u8>, Error> {
        let session = self.sessions.consume_session(&req.session_id)?;

        let appraisal = self.appraise(req).await?;

        binding::check_hardware_trust(&appraisal)?;

        let evidence = Evidence::extract(req.platform, &appraisal.processed_evidence)?;

        tracing::debug!(
            nonce = %hex::encode(evidence.nonce()),
            csr_hash = %hex::encode(evidence.csr_hash()),
            measurement = %hex::encode(evidence.measurement()),
            "evidence extracted"
        );

        let csr = binding::verify(&session, &evidence, &req.csr)?;

        let cert = ca::synthesize(&csr, evidence.measurement(), &self.ca)
            .map_err(|e| Error::CertificateSynthesis(e.to_string()))?;

        let ca_der = self.ca.certificate_der();
        let mut out = Vec::with_capacity(cert.len() + ca_der.len());
        out.extend_from_slice(&cert);
        out.extend_from_slice(ca_der);

        Ok(out)
    }

    async fn appraise(&self, req: &AttestationRequest) -> Result<Appraisal, Error> {
        let call = self.verifier.get_attestation(
            &self.tenant_id,
            &req.token,
            req.platform.media_type(),
        );

        match tokio::time::timeout(self.verifier_timeout, call).await {
            Ok(r) => Ok(r?),
            Err(_) => Err(Error::Verifier(format!(
                "no appraisal within {:?}",
                self.verifier_timeout
            ))),
        }
    }
}

impl std::fmt::Debug for Proxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Proxy")
            .field("ca", &self.ca)
            .field("tenant_id", &self.tenant_id)
            .field("verifier_timeout", &self.verifier_timeout)
            .finish_non_exhaustive()
    }
}
