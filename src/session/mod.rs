// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! The session module issues and tracks attestation challenges.  Each
//! [`Session`] pairs a random UUID with a fresh nonce that the attester must
//! embed in its evidence.

pub use self::challenge::Session;
pub use self::challenge::SessionId;
pub use self::challenge::NONCE_SIZE;
pub use self::errors::Error;
pub use self::isessionstore::ISessionStore;
pub use self::memo_sessionstore::MemoSessionStore;

mod challenge;
mod errors;
mod isessionstore;
mod memo_sessionstore;
