// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

#[derive(thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Session not found: {0}")]
    NotFound(String),
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NotFound(e) | Error::Storage(e) => {
                write!(f, "{}", e)
            }
        }
    }
}
