// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::common::*;
use super::errors::Error;

const PSA_NONCE: &str = "psa-nonce";
const PSA_SW_COMPONENTS: &str = "psa-software-components";
const SW_COMPONENT_MVAL: &str = "measurement-value";
const SW_COMPONENT_SIGNER_ID: &str = "signer-id";

/// The subset of a PSA software component the proxy relies upon
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SwComponent {
    /// Measurement of the attested runtime
    pub mval: Vec<u8>,
    /// Repurposed by the attester to carry the hash of the CSR it vouches for
    pub signer_id: Vec<u8>,
}

impl SwComponent {
    fn decode(m: &EvidenceMap) -> Result<SwComponent, Error> {
        Ok(SwComponent {
            mval: bstr_field(m, SW_COMPONENT_MVAL)?,
            signer_id: bstr_field(m, SW_COMPONENT_SIGNER_ID)?,
        })
    }
}

/// PSA claims extracted from the verifier's processed evidence
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PsaEvidence {
    pub nonce: Vec<u8>,
    /// First entry of the software components list
    pub sw_component: SwComponent,
}

impl PsaEvidence {
    /// Decode the PSA processed evidence.  Only the first software component
    /// is considered.
    pub fn decode(m: &EvidenceMap) -> Result<PsaEvidence, Error> {
        let nonce = bstr_field(m, PSA_NONCE)?;

        let components = to_array(lookup(m, PSA_SW_COMPONENTS)?, PSA_SW_COMPONENTS)?;

        let first = components
            .first()
            .ok_or_else(|| Error::Sema(format!("{PSA_SW_COMPONENTS}: empty list")))?;

        let name = format!("{PSA_SW_COMPONENTS}[0]");
        let sw_component = SwComponent::decode(to_map(first, &name)?)
            .map_err(|e| prefix_field(e, &name))?;

        Ok(PsaEvidence {
            nonce,
            sw_component,
        })
    }
}

fn prefix_field(e: Error, prefix: &str) -> Error {
    match e {
        Error::MissingField(f) => Error::MissingField(format!("{prefix}.{f}")),
        Error::TypeMismatch(f) => Error::TypeMismatch(format!("{prefix}.{f}")),
        Error::Decode(f) => Error::Decode(format!("{prefix}.{f}")),
        Error::Sema(f) => Error::Sema(format!("{prefix}.{f}")),
    }
}
