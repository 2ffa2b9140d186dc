// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

#[derive(thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Verifier transport error: {0}")]
    Transport(String),
    #[error("Verifier timed out: {0}")]
    Timeout(String),
    #[error("Verifier rejected token: {0}")]
    Rejected(String),
    #[error("Verifier response syntax error: {0}")]
    Syntax(String),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Transport(e) | Error::Timeout(e) | Error::Rejected(e) | Error::Syntax(e) => {
                write!(f, "{}", e)
            }
        }
    }
}
