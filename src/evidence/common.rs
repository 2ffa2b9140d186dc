// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use crate::base64;
use serde_json::{Map, Value};

pub type EvidenceMap = Map<String, Value>;

pub fn lookup<'a>(m: &'a EvidenceMap, n: &str) -> Result<&'a Value, Error> {
    m.get(n).ok_or_else(|| Error::MissingField(n.to_string()))
}

pub fn to_bstr(v: &Value, n: &str) -> Result<Vec<u8>, Error> {
    let s = v
        .as_str()
        .ok_or_else(|| Error::TypeMismatch(format!("{n}: expecting base64 string, got {v}")))?;

    base64::decode_str(s).map_err(|e| Error::Decode(format!("{n}: {e}")))
}

pub fn to_array<'a>(v: &'a Value, n: &str) -> Result<&'a Vec<Value>, Error> {
    v.as_array()
        .ok_or_else(|| Error::TypeMismatch(format!("{n}: expecting array, got {v}")))
}

pub fn to_map<'a>(v: &'a Value, n: &str) -> Result<&'a EvidenceMap, Error> {
    v.as_object()
        .ok_or_else(|| Error::TypeMismatch(format!("{n}: expecting map, got {v}")))
}

/// Lookup `n` in `m` and decode it as base64 bytes
pub fn bstr_field(m: &EvidenceMap, n: &str) -> Result<Vec<u8>, Error> {
    to_bstr(lookup(m, n)?, n)
}
