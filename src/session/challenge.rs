// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use openssl::rand::rand_bytes;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Size in bytes of the challenge issued with each session
pub const NONCE_SIZE: usize = 32;

pub type SessionId = Uuid;

/// An attestation challenge and its bookkeeping.  A session is write-once:
/// the nonce is drawn when the session is created and never changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Unique session identifier (UUID v4)
    pub id: SessionId,
    /// Challenge the attester must echo back in its evidence
    pub nonce: Vec<u8>,
    /// When the challenge was issued
    pub created_at: Instant,
}

impl Session {
    /// Return a new session with a random identifier and a fresh nonce drawn
    /// from the OpenSSL CSPRNG
    pub fn new() -> Result<Self, Error> {
        let mut nonce = vec![0u8; NONCE_SIZE];

        rand_bytes(&mut nonce).map_err(|e| Error::Storage(format!("drawing nonce: {e}")))?;

        Ok(Self {
            id: Uuid::new_v4(),
            nonce,
            created_at: Instant::now(),
        })
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}
