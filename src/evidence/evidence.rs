// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::common::EvidenceMap;
use super::errors::Error;
use super::nitro::NitroEvidence;
use super::platform::Platform;
use super::psa::PsaEvidence;

/// Platform evidence, as extracted from the verifier's appraisal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evidence {
    Psa(PsaEvidence),
    Nitro(NitroEvidence),
}

impl Evidence {
    /// Extract the platform-specific fields from the processed evidence map.
    /// Any absent, mistyped or undecodable field results in an error naming
    /// the offending field.
    pub fn extract(platform: Platform, m: &EvidenceMap) -> Result<Evidence, Error> {
        match platform {
            Platform::Psa => PsaEvidence::decode(m).map(Evidence::Psa),
            Platform::Nitro => NitroEvidence::decode(m).map(Evidence::Nitro),
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            Evidence::Psa(_) => Platform::Psa,
            Evidence::Nitro(_) => Platform::Nitro,
        }
    }

    /// Challenge echoed by the attester
    pub fn nonce(&self) -> &[u8] {
        match self {
            Evidence::Psa(e) => &e.nonce,
            Evidence::Nitro(e) => &e.nonce,
        }
    }

    /// Measurement identifying the attested runtime
    pub fn measurement(&self) -> &[u8] {
        match self {
            Evidence::Psa(e) => &e.sw_component.mval,
            Evidence::Nitro(e) => e.measurement(),
        }
    }

    /// Hash of the CSR the attester vouches for
    pub fn csr_hash(&self) -> &[u8] {
        match self {
            Evidence::Psa(e) => &e.sw_component.signer_id,
            Evidence::Nitro(e) => &e.user_data,
        }
    }
}
