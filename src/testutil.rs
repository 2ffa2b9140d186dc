// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Key material and fixtures shared by the unit tests.

use crate::ca::CaIdentity;
use crate::evidence::Platform;
use crate::verifier::{Appraisal, Error as VerifierError, IVerifier};
use async_trait::async_trait;
use ear::claim::GENUINE_HARDWARE;
use openssl::asn1::Asn1Time;
use openssl::bn::{BigNum, MsbOption};
use openssl::ec::{EcGroup, EcKey};
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{PKey, Private};
use openssl::stack::Stack;
use openssl::x509::extension::{BasicConstraints, KeyUsage, SubjectAlternativeName};
use openssl::x509::{X509Builder, X509NameBuilder, X509ReqBuilder, X509};
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn ec_key(nid: Nid) -> PKey<Private> {
    let group = EcGroup::from_curve_name(nid).unwrap();
    PKey::from_ec_key(EcKey::generate(&group).unwrap()).unwrap()
}

/// Self-signed CA certificate for `key`
pub fn ca_cert(key: &PKey<Private>, cn: &str) -> X509 {
    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_text("CN", cn).unwrap();
    name.append_entry_by_text("O", "Veraison").unwrap();
    let name = name.build();

    let mut serial = BigNum::new().unwrap();
    serial.rand(64, MsbOption::MAYBE_ZERO, false).unwrap();

    let mut b = X509Builder::new().unwrap();
    b.set_version(2).unwrap();
    b.set_serial_number(&serial.to_asn1_integer().unwrap())
        .unwrap();
    b.set_subject_name(&name).unwrap();
    b.set_issuer_name(&name).unwrap();
    b.set_pubkey(key).unwrap();
    b.set_not_before(&Asn1Time::days_from_now(0).unwrap()).unwrap();
    b.set_not_after(&Asn1Time::days_from_now(365).unwrap())
        .unwrap();
    b.append_extension(BasicConstraints::new().critical().ca().build().unwrap())
        .unwrap();
    b.append_extension(
        KeyUsage::new()
            .critical()
            .key_cert_sign()
            .crl_sign()
            .build()
            .unwrap(),
    )
    .unwrap();
    b.sign(key, MessageDigest::sha256()).unwrap();

    b.build()
}

pub fn ca_identity() -> CaIdentity {
    let key = ec_key(Nid::X9_62_PRIME256V1);
    let cert = ca_cert(&key, "Proxy Attestation CA");

    CaIdentity::new(cert, key).unwrap()
}

/// DER-encoded CSR with a few SANs of every supported kind
pub fn csr_der(key: &PKey<Private>) -> Vec<u8> {
    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_text("CN", "device-0001").unwrap();
    name.append_entry_by_text("O", "Example Devices").unwrap();

    let mut b = X509ReqBuilder::new().unwrap();
    b.set_version(0).unwrap();
    b.set_subject_name(&name.build()).unwrap();
    b.set_pubkey(key).unwrap();

    let san = SubjectAlternativeName::new()
        .dns("device-0001.example.com")
        .email("ops@example.com")
        .ip("10.0.0.7")
        .ip("::1")
        .uri("spiffe://example.com/device-0001")
        .build(&b.x509v3_context(None))
        .unwrap();

    let mut exts = Stack::new().unwrap();
    exts.push(san).unwrap();
    b.add_extensions(&exts).unwrap();

    b.sign(key, MessageDigest::sha256()).unwrap();

    b.build().to_der().unwrap()
}

/// DER-encoded CSR with no requested extensions at all
pub fn bare_csr_der(key: &PKey<Private>) -> Vec<u8> {
    let mut name = X509NameBuilder::new().unwrap();
    name.append_entry_by_text("CN", "bare").unwrap();

    let mut b = X509ReqBuilder::new().unwrap();
    b.set_subject_name(&name.build()).unwrap();
    b.set_pubkey(key).unwrap();
    b.sign(key, MessageDigest::sha256()).unwrap();

    b.build().to_der().unwrap()
}

/// Flip the last bit of the signature, keeping the DER structure intact
pub fn tamper_signature(der: &[u8]) -> Vec<u8> {
    let mut v = der.to_vec();
    if let Some(last) = v.last_mut() {
        *last ^= 0x01;
    }
    v
}

pub fn sha256(v: &[u8]) -> Vec<u8> {
    openssl::sha::sha256(v).to_vec()
}

pub fn affirming_appraisal(processed_evidence: Value) -> Appraisal {
    let mut a = Appraisal {
        processed_evidence: as_map(processed_evidence),
        ..Default::default()
    };
    a.trust_vector.hardware.set(GENUINE_HARDWARE);
    a
}

pub fn as_map(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        _ => Map::new(),
    }
}

pub fn psa_evidence(nonce: &[u8], measurement: &[u8], csr_hash: &[u8]) -> Value {
    json!({
        "psa-nonce": crate::base64::encode(nonce),
        "psa-software-components": [
            {
                "measurement-type": "RT",
                "measurement-value": crate::base64::encode(measurement),
                "signer-id": crate::base64::encode(csr_hash),
            }
        ]
    })
}

pub fn nitro_evidence(nonce: &[u8], pcr0: &[u8], csr_hash: &[u8]) -> Value {
    json!({
        "nonce": crate::base64::encode(nonce),
        "PCR0": crate::base64::encode(pcr0),
        "user_data": crate::base64::encode(csr_hash),
    })
}

/// Verifier double returning a canned appraisal or error
pub struct StaticVerifier {
    pub result: Result<Appraisal, VerifierError>,
    pub delay: Option<Duration>,
    pub calls: AtomicUsize,
}

impl StaticVerifier {
    pub fn new(result: Result<Appraisal, VerifierError>) -> Self {
        Self {
            result,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IVerifier for StaticVerifier {
    async fn get_attestation(
        &self,
        _tenant_id: &str,
        _token: &[u8],
        media_type: &str,
    ) -> Result<Appraisal, VerifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        assert!(
            media_type == Platform::Psa.media_type() || media_type == Platform::Nitro.media_type()
        );

        if let Some(d) = self.delay {
            tokio::time::sleep(d).await;
        }

        self.result.clone()
    }
}
