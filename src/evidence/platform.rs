// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use std::fmt;
use std::str::FromStr;

pub const PSA_MEDIA_TYPE: &str = "application/psa-attestation-token";
pub const NITRO_MEDIA_TYPE: &str = "application/aws-nitro-document";

/// Attestation platforms the proxy knows how to handle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Psa,
    Nitro,
}

impl Platform {
    /// Media type under which the platform's attestation token is submitted
    /// to the verification service
    pub fn media_type(&self) -> &'static str {
        match self {
            Platform::Psa => PSA_MEDIA_TYPE,
            Platform::Nitro => NITRO_MEDIA_TYPE,
        }
    }

    /// Path segment identifying the platform in the proxy API
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Psa => "PSA",
            Platform::Nitro => "Nitro",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PSA" => Ok(Platform::Psa),
            "Nitro" => Ok(Platform::Nitro),
            x => Err(Error::Sema(format!("unsupported platform {x}"))),
        }
    }
}
