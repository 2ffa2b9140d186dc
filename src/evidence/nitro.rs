// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::common::*;
use super::errors::Error;

const NITRO_NONCE: &str = "nonce";
const NITRO_PCR0: &str = "PCR0";
const NITRO_USER_DATA: &str = "user_data";

/// Number of leading PCR0 bytes used as the enclave measurement
pub const NITRO_MEASUREMENT_SIZE: usize = 32;

/// AWS Nitro attestation document fields extracted from the verifier's
/// processed evidence
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NitroEvidence {
    pub nonce: Vec<u8>,
    /// Full PCR0 value (at least [`NITRO_MEASUREMENT_SIZE`] bytes)
    pub pcr0: Vec<u8>,
    /// Carries the hash of the CSR the enclave vouches for
    pub user_data: Vec<u8>,
}

impl NitroEvidence {
    pub fn decode(m: &EvidenceMap) -> Result<NitroEvidence, Error> {
        let nonce = bstr_field(m, NITRO_NONCE)?;

        let pcr0 = bstr_field(m, NITRO_PCR0)?;

        if pcr0.len() < NITRO_MEASUREMENT_SIZE {
            return Err(Error::Sema(format!(
                "{NITRO_PCR0}: expecting at least {NITRO_MEASUREMENT_SIZE} bytes, got {}",
                pcr0.len()
            )));
        }

        let user_data = bstr_field(m, NITRO_USER_DATA)?;

        Ok(NitroEvidence {
            nonce,
            pcr0,
            user_data,
        })
    }

    /// The enclave measurement, i.e. the first 32 bytes of PCR0
    pub fn measurement(&self) -> &[u8] {
        self.pcr0
            .get(..NITRO_MEASUREMENT_SIZE)
            .unwrap_or(self.pcr0.as_slice())
    }
}
