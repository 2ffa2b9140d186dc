// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::appraisal::Appraisal;
use super::errors::Error;
use async_trait::async_trait;

/// Interface to the attestation verification service
#[async_trait]
pub trait IVerifier: Send + Sync {
    /// Submit an attestation token of the given media type on behalf of
    /// `tenant_id` and return the verifier's appraisal
    async fn get_attestation(
        &self,
        tenant_id: &str,
        token: &[u8],
        media_type: &str,
    ) -> Result<Appraisal, Error>;
}
