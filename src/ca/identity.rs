// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use openssl::hash::MessageDigest;
use openssl::pkey::{Id, PKey, PKeyRef, Private};
use openssl::x509::{X509Ref, X509};
use std::fmt;
use std::fs;
use std::path::Path;

/// The CA certificate and its signing key.  Built once at startup and shared
/// read-only (typically behind an `Arc`) by every issuance.
pub struct CaIdentity {
    cert: X509,
    cert_der: Vec<u8>,
    key: PKey<Private>,
}

impl CaIdentity {
    /// Pair a CA certificate with its private key.  Fails if the key does not
    /// match the certificate's public key.
    pub fn new(cert: X509, key: PKey<Private>) -> Result<Self, Error> {
        let pubkey = cert
            .public_key()
            .map_err(|e| Error::Load(format!("extracting CA public key: {e}")))?;

        if !pubkey.public_eq(&key) {
            return Err(Error::Load(
                "CA private key does not match the CA certificate".to_string(),
            ));
        }

        let cert_der = cert
            .to_der()
            .map_err(|e| Error::Load(format!("encoding CA certificate: {e}")))?;

        Ok(Self {
            cert,
            cert_der,
            key,
        })
    }

    /// Load the CA from a PEM certificate and a PEM private key (SEC1 or
    /// PKCS#8)
    pub fn from_pem(cert_pem: &[u8], key_pem: &[u8]) -> Result<Self, Error> {
        let cert = X509::from_pem(cert_pem)
            .map_err(|e| Error::Load(format!("parsing CA certificate: {e}")))?;

        let key = PKey::private_key_from_pem(key_pem)
            .map_err(|e| Error::Load(format!("parsing CA private key: {e}")))?;

        Self::new(cert, key)
    }

    pub fn from_pem_files(
        cert_path: impl AsRef<Path>,
        key_path: impl AsRef<Path>,
    ) -> Result<Self, Error> {
        let cert_path = cert_path.as_ref();
        let key_path = key_path.as_ref();

        let cert_pem = fs::read(cert_path)
            .map_err(|e| Error::Load(format!("reading {}: {e}", cert_path.display())))?;

        let key_pem = fs::read(key_path)
            .map_err(|e| Error::Load(format!("reading {}: {e}", key_path.display())))?;

        Self::from_pem(&cert_pem, &key_pem)
    }

    pub fn certificate(&self) -> &X509Ref {
        &self.cert
    }

    /// DER encoding of the CA certificate, appended to every issued
    /// certificate so the caller can build the chain
    pub fn certificate_der(&self) -> &[u8] {
        &self.cert_der
    }

    pub(crate) fn key(&self) -> &PKeyRef<Private> {
        &self.key
    }

    /// Digest matching the strength of the CA key
    pub fn signing_digest(&self) -> MessageDigest {
        match self.key.id() {
            Id::EC => match self.key.bits() {
                b if b > 384 => MessageDigest::sha512(),
                b if b > 256 => MessageDigest::sha384(),
                _ => MessageDigest::sha256(),
            },
            Id::ED25519 | Id::ED448 => MessageDigest::null(),
            _ => MessageDigest::sha256(),
        }
    }
}

impl fmt::Debug for CaIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // never print the key
        f.debug_struct("CaIdentity")
            .field("subject", &self.cert.subject_name())
            .finish_non_exhaustive()
    }
}
