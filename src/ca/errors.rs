// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

#[derive(thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("CA identity error: {0}")]
    Load(String),
    #[error("CSR error: {0}")]
    Csr(String),
    #[error("Certificate synthesis error: {0}")]
    Synthesis(String),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Load(e) | Error::Csr(e) | Error::Synthesis(e) => {
                write!(f, "{}", e)
            }
        }
    }
}
