// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::challenge::{Session, SessionId};
use super::errors::Error;
use super::ISessionStore;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

const DEFAULT_TTL: Duration = Duration::from_secs(300);
const DEFAULT_MAX_SESSIONS: usize = 65536;

/// In-memory session store.  Sessions are indexed by their id and are never
/// mutated once inserted, so a single `RwLock` around the map is enough.
#[derive(Debug)]
pub struct MemoSessionStore {
    p: RwLock<HashMap<SessionId, Session>>,
    ttl: Duration,
    max_sessions: usize,
}

impl Default for MemoSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoSessionStore {
    /// Returns a new empty store with the default lifetime and capacity
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_TTL, DEFAULT_MAX_SESSIONS)
    }

    /// Returns a new empty store whose sessions expire after `ttl` and which
    /// holds at most `max_sessions` live sessions
    pub fn with_limits(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            p: Default::default(),
            ttl,
            max_sessions,
        }
    }

    /// Drop every expired session, returning how many were evicted
    pub fn purge_expired(&self) -> Result<usize, Error> {
        let mut p = self.p.write().map_err(poisoned)?;

        let before = p.len();
        p.retain(|_, s| !s.is_expired(self.ttl));

        Ok(before - p.len())
    }

    pub fn len(&self) -> Result<usize, Error> {
        Ok(self.p.read().map_err(poisoned)?.len())
    }

    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.len()? == 0)
    }
}

impl ISessionStore for MemoSessionStore {
    fn create_session(&self) -> Result<SessionId, Error> {
        let s = Session::new()?;
        let id = s.id;

        let mut p = self.p.write().map_err(poisoned)?;

        if p.len() >= self.max_sessions {
            p.retain(|_, s| !s.is_expired(self.ttl));

            if p.len() >= self.max_sessions {
                return Err(Error::Storage(format!(
                    "session store full ({} live sessions)",
                    p.len()
                )));
            }
        }

        if p.contains_key(&id) {
            return Err(Error::Storage(format!("duplicated session id {id}")));
        }

        p.insert(id, s);

        Ok(id)
    }

    fn get_session(&self, id: &SessionId) -> Result<Session, Error> {
        let p = self.p.read().map_err(poisoned)?;

        match p.get(id) {
            Some(s) if !s.is_expired(self.ttl) => Ok(s.clone()),
            Some(_) => Err(Error::NotFound(format!("session {id} has expired"))),
            None => Err(Error::NotFound(format!("no session with id {id}"))),
        }
    }

    fn consume_session(&self, id: &SessionId) -> Result<Session, Error> {
        let mut p = self.p.write().map_err(poisoned)?;

        match p.remove(id) {
            Some(s) if !s.is_expired(self.ttl) => Ok(s),
            Some(_) => Err(Error::NotFound(format!("session {id} has expired"))),
            None => Err(Error::NotFound(format!("no session with id {id}"))),
        }
    }
}

fn poisoned<T>(e: std::sync::PoisonError<T>) -> Error {
    Error::Storage(format!("session map lock poisoned: {e}"))
}
