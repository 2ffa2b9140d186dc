// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

#[derive(thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("Field type mismatch: {0}")]
    TypeMismatch(String),
    #[error("Field decoding error: {0}")]
    Decode(String),
    #[error("Semantic error: {0}")]
    Sema(String),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingField(e)
            | Error::TypeMismatch(e)
            | Error::Decode(e)
            | Error::Sema(e) => {
                write!(f, "{}", e)
            }
        }
    }
}
