// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Base64 as used on the wire: padded, standard alphabet, both for the
//! multipart form fields and for the verifier's processed evidence.

use base64::{engine::general_purpose, DecodeError, Engine as _};

pub fn decode_str(v: &str) -> Result<Vec<u8>, DecodeError> {
    general_purpose::STANDARD.decode(v)
}

pub fn encode(v: &[u8]) -> String {
    general_purpose::STANDARD.encode(v)
}
