// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Checks tying an appraised attestation to the session it answers and to
//! the CSR it vouches for.  They are meant to run in the order
//! [`check_hardware_trust`], [`check_nonce`], [`check_csr_binding`],
//! [`check_csr_signature`]; [`verify`] runs the last three.

use super::errors::Error;
use crate::ca::CertificateRequest;
use crate::evidence::Evidence;
use crate::session::Session;
use crate::verifier::Appraisal;
use openssl::memcmp;
use openssl::sha::sha256;

/// The verifier must have affirmed the platform hardware
pub fn check_hardware_trust(appraisal: &Appraisal) -> Result<(), Error> {
    if appraisal.is_hardware_affirming() {
        return Ok(());
    }

    Err(Error::AttestationNotTrusted(format!(
        "hardware claim is {}, expecting an affirming value",
        appraisal.trust_vector.hardware.get()
    )))
}

/// The nonce echoed in the evidence must be the session's challenge
pub fn check_nonce(session: &Session, evidence: &Evidence) -> Result<(), Error> {
    if ct_eq(&session.nonce, evidence.nonce()) {
        return Ok(());
    }

    Err(Error::NonceMismatch(format!(
        "{} nonce does not match session {}",
        evidence.platform(),
        session.id
    )))
}

/// The evidence must carry the SHA-256 of the exact CSR bytes submitted
pub fn check_csr_binding(csr_der: &[u8], evidence: &Evidence) -> Result<(), Error> {
    let digest = sha256(csr_der);

    if ct_eq(&digest, evidence.csr_hash()) {
        return Ok(());
    }

    Err(Error::CsrBinding(format!(
        "CSR hash in {} evidence does not match sha256(CSR)",
        evidence.platform()
    )))
}

/// Parse the CSR and check its self-signature.  A CSR that cannot be parsed
/// at all is a malformed request.
pub fn check_csr_signature(csr_der: &[u8]) -> Result<CertificateRequest, Error> {
    let csr =
        CertificateRequest::from_der(csr_der).map_err(|e| Error::MalformedRequest(e.to_string()))?;

    csr.verify_signature()
        .map_err(|e| Error::InvalidCsrSignature(e.to_string()))?;

    Ok(csr)
}

/// Run the session, CSR-hash and CSR-signature checks in order, returning
/// the parsed CSR once they all pass
pub fn verify(
    session: &Session,
    evidence: &Evidence,
    csr_der: &[u8],
) -> Result<CertificateRequest, Error> {
    check_nonce(session, evidence)?;
    check_csr_binding(csr_der, evidence)?;
    check_csr_signature(csr_der)
}

fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    // memcmp::eq panics on length mismatch
    a.len() == b.len() && memcmp::eq(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::Platform;
    use crate::testutil;
    use openssl::nid::Nid;

    fn psa(nonce: &[u8], csr_hash: &[u8]) -> Evidence {
        let v = testutil::psa_evidence(nonce, &[0xaa; 32], csr_hash);
        Evidence::extract(Platform::Psa, &testutil::as_map(v)).unwrap()
    }

    fn nitro(nonce: &[u8], csr_hash: &[u8]) -> Evidence {
        let v = testutil::nitro_evidence(nonce, &[0xbb; 48], csr_hash);
        Evidence::extract(Platform::Nitro, &testutil::as_map(v)).unwrap()
    }

    #[test]
    fn hardware_trust() {
        let ok = testutil::affirming_appraisal(serde_json::json!({}));
        assert!(check_hardware_trust(&ok).is_ok());

        let none = Appraisal::default();
        assert!(matches!(
            check_hardware_trust(&none),
            Err(Error::AttestationNotTrusted(_))
        ));

        let mut contra = Appraisal::default();
        contra
            .trust_vector
            .hardware
            .set(ear::claim::UNSAFE_HARDWARE);
        assert!(matches!(
            check_hardware_trust(&contra),
            Err(Error::AttestationNotTrusted(_))
        ));
    }

    #[test]
    fn nonce() {
        let s = Session::new().unwrap();

        assert!(check_nonce(&s, &psa(&s.nonce, &[0; 32])).is_ok());
        assert!(check_nonce(&s, &nitro(&s.nonce, &[0; 32])).is_ok());

        let mut other = s.nonce.clone();
        other[0] ^= 0xff;
        assert!(matches!(
            check_nonce(&s, &psa(&other, &[0; 32])),
            Err(Error::NonceMismatch(_))
        ));

        // a prefix of the right nonce is still a mismatch
        assert!(matches!(
            check_nonce(&s, &nitro(&s.nonce[..16], &[0; 32])),
            Err(Error::NonceMismatch(_))
        ));
    }

    #[test]
    fn csr_binding() {
        let key = testutil::ec_key(Nid::X9_62_PRIME256V1);
        let csr = testutil::csr_der(&key);
        let h = testutil::sha256(&csr);

        assert!(check_csr_binding(&csr, &psa(&[1; 32], &h)).is_ok());
        assert!(check_csr_binding(&csr, &nitro(&[1; 32], &h)).is_ok());

        // hash of a different CSR
        let other = testutil::csr_der(&testutil::ec_key(Nid::X9_62_PRIME256V1));
        assert!(matches!(
            check_csr_binding(&other, &psa(&[1; 32], &h)),
            Err(Error::CsrBinding(_))
        ));

        // truncated hash
        assert!(matches!(
            check_csr_binding(&csr, &nitro(&[1; 32], &h[..20])),
            Err(Error::CsrBinding(_))
        ));
    }

    #[test]
    fn csr_signature() {
        let key = testutil::ec_key(Nid::X9_62_PRIME256V1);
        let csr = testutil::csr_der(&key);

        assert!(check_csr_signature(&csr).is_ok());

        assert!(matches!(
            check_csr_signature(&testutil::tamper_signature(&csr)),
            Err(Error::InvalidCsrSignature(_))
        ));

        assert!(matches!(
            check_csr_signature(b"definitely not DER"),
            Err(Error::MalformedRequest(_))
        ));
    }

    #[test]
    fn verify_checks_nonce_before_csr() {
        let s = Session::new().unwrap();
        let key = testutil::ec_key(Nid::X9_62_PRIME256V1);
        let csr = testutil::tamper_signature(&testutil::csr_der(&key));

        // wrong nonce and wrong hash and bad signature: the nonce is reported
        let r = verify(&s, &psa(&[0; 32], &[0; 32]), &csr);
        assert!(matches!(r, Err(Error::NonceMismatch(_))));

        // right nonce, wrong hash, bad signature: the hash is reported
        let r = verify(&s, &psa(&s.nonce, &[0; 32]), &csr);
        assert!(matches!(r, Err(Error::CsrBinding(_))));

        // right nonce, right hash, bad signature
        let r = verify(&s, &psa(&s.nonce, &testutil::sha256(&csr)), &csr);
        assert!(matches!(r, Err(Error::InvalidCsrSignature(_))));
    }
}
