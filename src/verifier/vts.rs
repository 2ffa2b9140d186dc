// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::appraisal::Appraisal;
use super::errors::Error;
use super::iverifier::IVerifier;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

const ATTESTATION_PATH: &str = "/attestation";

/// An attestation token as submitted to the verification service
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
struct AttestationToken<'a> {
    tenant_id: &'a str,
    media_type: &'a str,
    /// base64 of the raw token
    data: String,
}

/// HTTP/JSON client for the Veraison trusted services (VTS)
#[derive(Debug, Clone)]
pub struct VtsClient {
    client: Client,
    url: String,
}

impl VtsClient {
    /// Returns a client talking to the verifier at `base_url`.  Every request
    /// is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Transport(format!("building HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: format!("{}{ATTESTATION_PATH}", base_url.trim_end_matches('/')),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl IVerifier for VtsClient {
    async fn get_attestation(
        &self,
        tenant_id: &str,
        token: &[u8],
        media_type: &str,
    ) -> Result<Appraisal, Error> {
        let body = AttestationToken {
            tenant_id,
            media_type,
            data: crate::base64::encode(token),
        };

        tracing::debug!(url = %self.url, media_type, "submitting attestation token");

        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(format!("POST {}: {e}", self.url))
                } else {
                    Error::Transport(format!("POST {}: {e}", self.url))
                }
            })?;

        let status = resp.status();

        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();

            return Err(Error::Rejected(format!("{status}: {detail}")));
        }

        // must decode from the raw body: the trust vector needs borrowed keys,
        // and a verifier escaping them is reported as a syntax error
        resp.json::<Appraisal>()
            .await
            .map_err(|e| Error::Syntax(e.to_string()))
    }
}
