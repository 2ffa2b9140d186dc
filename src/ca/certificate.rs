// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::csr::{CertificateRequest, SubjectAltNames};
use super::errors::Error;
use super::identity::CaIdentity;
use openssl::asn1::{Asn1Integer, Asn1Object, Asn1OctetString, Asn1Time};
use openssl::bn::{BigNum, MsbOption};
use openssl::error::ErrorStack;
use openssl::x509::extension::{BasicConstraints, KeyUsage, SubjectAlternativeName};
use openssl::x509::{X509Builder, X509Extension};
use std::time::{SystemTime, UNIX_EPOCH};

/// Object identifier of the extension carrying the attested measurement
pub const MEASUREMENT_EXTENSION_OID: &str = "2.5.30.1";

/// Lifetime of an issued certificate (24 hours)
pub const VALIDITY_SECS: i64 = 24 * 60 * 60;

const SERIAL_BITS: i32 = 127;

/// Mint a leaf certificate for the subject and public key of `csr`, signed
/// by `ca`, embedding `measurement` as a non-critical extension.  Returns
/// the DER-encoded certificate.
pub fn synthesize(
    csr: &CertificateRequest,
    measurement: &[u8],
    ca: &CaIdentity,
) -> Result<Vec<u8>, Error> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| Error::Synthesis(format!("reading system time: {e}")))?;

    let not_before = i64::try_from(now.as_secs())
        .map_err(|e| Error::Synthesis(format!("system time out of range: {e}")))?;

    synthesize_at(csr, measurement, ca, not_before)
}

fn synthesize_at(
    csr: &CertificateRequest,
    measurement: &[u8],
    ca: &CaIdentity,
    not_before: i64,
) -> Result<Vec<u8>, Error> {
    let pubkey = csr
        .public_key()
        .map_err(|e| Error::Synthesis(e.to_string()))?;

    let mut b = X509Builder::new().map_err(synthesis("creating builder"))?;

    b.set_version(2).map_err(synthesis("setting version"))?;

    let serial = random_serial().map_err(synthesis("drawing serial number"))?;

    b.set_serial_number(&serial)
        .map_err(synthesis("setting serial number"))?;

    b.set_subject_name(csr.subject_name())
        .map_err(synthesis("setting subject"))?;

    b.set_issuer_name(ca.certificate().subject_name())
        .map_err(synthesis("setting issuer"))?;

    b.set_pubkey(&pubkey)
        .map_err(synthesis("setting public key"))?;

    let nb = Asn1Time::from_unix(not_before).map_err(synthesis("encoding notBefore"))?;
    let na = Asn1Time::from_unix(not_before + VALIDITY_SECS)
        .map_err(synthesis("encoding notAfter"))?;

    b.set_not_before(&nb)
        .map_err(synthesis("setting notBefore"))?;
    b.set_not_after(&na).map_err(synthesis("setting notAfter"))?;

    b.append_extension(
        BasicConstraints::new()
            .critical()
            .build()
            .map_err(synthesis("encoding basic constraints"))?,
    )
    .map_err(synthesis("adding basic constraints"))?;

    b.append_extension(
        KeyUsage::new()
            .critical()
            .digital_signature()
            .key_cert_sign()
            .build()
            .map_err(synthesis("encoding key usage"))?,
    )
    .map_err(synthesis("adding key usage"))?;

    let san = csr.subject_alt_names();

    if !san.is_empty() {
        let ext = san_builder(san)
            .build(&b.x509v3_context(Some(ca.certificate()), None))
            .map_err(synthesis("encoding subject alternative names"))?;

        b.append_extension(ext)
            .map_err(synthesis("adding subject alternative names"))?;
    }

    let ext = measurement_extension(measurement).map_err(synthesis("encoding measurement"))?;

    b.append_extension(ext)
        .map_err(synthesis("adding measurement"))?;

    b.sign(ca.key(), ca.signing_digest())
        .map_err(synthesis("signing"))?;

    b.build().to_der().map_err(synthesis("encoding certificate"))
}

fn san_builder(san: &SubjectAltNames) -> SubjectAlternativeName {
    let mut sb = SubjectAlternativeName::new();

    for v in san.dns.iter() {
        sb.dns(v);
    }
    for v in san.email.iter() {
        sb.email(v);
    }
    for v in san.ip.iter() {
        sb.ip(&v.to_string());
    }
    for v in san.uri.iter() {
        sb.uri(v);
    }

    sb
}

fn measurement_extension(measurement: &[u8]) -> Result<X509Extension, ErrorStack> {
    let oid = Asn1Object::from_str(MEASUREMENT_EXTENSION_OID)?;
    let value = Asn1OctetString::new_from_bytes(measurement)?;

    X509Extension::new_from_der(&oid, false, &value)
}

/// Random positive serial in [1, 2^127]
fn random_serial() -> Result<Asn1Integer, ErrorStack> {
    let mut bn = BigNum::new()?;

    bn.rand(SERIAL_BITS, MsbOption::MAYBE_ZERO, false)?;
    bn.add_word(1)?;

    bn.to_asn1_integer()
}

fn synthesis(what: &'static str) -> impl Fn(ErrorStack) -> Error {
    move |e| Error::Synthesis(format!("{what}: {e}"))
}
