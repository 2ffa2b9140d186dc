// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use ear::{TrustTier, TrustVector};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The verifier's judgement of an attestation token: an AR4SI trust vector
/// and the claims it extracted from the token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Appraisal {
    pub trust_vector: TrustVector,
    /// Platform-dependent claims map, see [`crate::evidence::Evidence`]
    #[serde(default)]
    pub processed_evidence: Map<String, Value>,
}

impl Appraisal {
    /// True if the verifier vouched for the authenticity of the hardware
    pub fn is_hardware_affirming(&self) -> bool {
        self.trust_vector.hardware.tier() == TrustTier::Affirming
    }
}
