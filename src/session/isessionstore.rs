// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::challenge::{Session, SessionId};
use super::errors::Error;

/// Interface to the store where outstanding attestation sessions are kept.
/// Implementations must tolerate concurrent callers.
pub trait ISessionStore: Send + Sync {
    /// Create a new session with a fresh nonce and return its identifier
    fn create_session(&self) -> Result<SessionId, Error>;

    /// Lookup a session given its identifier.  The session is left in place.
    fn get_session(&self, id: &SessionId) -> Result<Session, Error>;

    /// Remove a session from the store and return it, so that its nonce
    /// cannot back a second attestation attempt
    fn consume_session(&self, id: &SessionId) -> Result<Session, Error>;
}
