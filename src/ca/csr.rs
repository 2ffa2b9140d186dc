// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use openssl::pkey::{PKey, Public};
use openssl::x509::{X509NameRef, X509Req};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use x509_parser::prelude::*;

/// Subject alternative names requested in a CSR
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubjectAltNames {
    pub dns: Vec<String>,
    pub email: Vec<String>,
    pub ip: Vec<IpAddr>,
    pub uri: Vec<String>,
}

impl SubjectAltNames {
    pub fn is_empty(&self) -> bool {
        self.dns.is_empty() && self.email.is_empty() && self.ip.is_empty() && self.uri.is_empty()
    }

    fn add(&mut self, name: &GeneralName) -> Result<(), Error> {
        match name {
            GeneralName::DNSName(s) => self.dns.push(s.to_string()),
            GeneralName::RFC822Name(s) => self.email.push(s.to_string()),
            GeneralName::URI(s) => self.uri.push(s.to_string()),
            GeneralName::IPAddress(b) => self.ip.push(to_ip(b)?),
            // other name forms are not carried over to the issued certificate
            _ => {}
        }
        Ok(())
    }
}

fn to_ip(b: &[u8]) -> Result<IpAddr, Error> {
    if let Ok(v4) = <[u8; 4]>::try_from(b) {
        return Ok(IpAddr::V4(Ipv4Addr::from(v4)));
    }

    if let Ok(v6) = <[u8; 16]>::try_from(b) {
        return Ok(IpAddr::V6(Ipv6Addr::from(v6)));
    }

    Err(Error::Csr(format!(
        "IP address SAN: expecting 4 or 16 bytes, got {}",
        b.len()
    )))
}

/// A caller-supplied PKCS#10 certificate signing request
pub struct CertificateRequest {
    der: Vec<u8>,
    req: X509Req,
    san: SubjectAltNames,
}

impl CertificateRequest {
    /// Parse a DER-encoded CSR.  Parsing does not check the self-signature,
    /// see [`CertificateRequest::verify_signature`].
    pub fn from_der(der: &[u8]) -> Result<Self, Error> {
        let req = X509Req::from_der(der).map_err(|e| Error::Csr(format!("parsing CSR: {e}")))?;

        let (rem, parsed) = X509CertificationRequest::from_der(der)
            .map_err(|e| Error::Csr(format!("parsing CSR: {e}")))?;

        if !rem.is_empty() {
            return Err(Error::Csr(format!(
                "{} trailing bytes after CSR",
                rem.len()
            )));
        }

        let mut san = SubjectAltNames::default();

        if let Some(exts) = parsed.requested_extensions() {
            for ext in exts {
                if let ParsedExtension::SubjectAlternativeName(names) = ext {
                    for name in names.general_names.iter() {
                        san.add(name)?;
                    }
                }
            }
        }

        Ok(Self {
            der: der.to_vec(),
            req,
            san,
        })
    }

    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    pub fn subject_name(&self) -> &X509NameRef {
        self.req.subject_name()
    }

    pub fn public_key(&self) -> Result<PKey<Public>, Error> {
        self.req
            .public_key()
            .map_err(|e| Error::Csr(format!("extracting CSR public key: {e}")))
    }

    pub fn subject_alt_names(&self) -> &SubjectAltNames {
        &self.san
    }

    /// Check the CSR's self-signature against its embedded public key
    pub fn verify_signature(&self) -> Result<(), Error> {
        let pkey = self.public_key()?;

        match self.req.verify(&pkey) {
            Ok(true) => Ok(()),
            Ok(false) => Err(Error::Csr("self-signature does not verify".to_string())),
            Err(e) => Err(Error::Csr(format!("verifying self-signature: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use openssl::nid::Nid;

    #[test]
    fn parse_and_verify_ok() {
        let key = testutil::ec_key(Nid::X9_62_PRIME256V1);
        let der = testutil::csr_der(&key);

        let csr = CertificateRequest::from_der(&der).unwrap();

        assert!(csr.verify_signature().is_ok());
        assert_eq!(csr.as_der(), der.as_slice());
        assert!(csr.public_key().unwrap().public_eq(&key));

        let san = csr.subject_alt_names();
        assert_eq!(san.dns, vec!["device-0001.example.com".to_string()]);
        assert_eq!(san.email, vec!["ops@example.com".to_string()]);
        assert_eq!(
            san.ip,
            vec![
                "10.0.0.7".parse::<IpAddr>().unwrap(),
                "::1".parse::<IpAddr>().unwrap()
            ]
        );
        assert_eq!(san.uri, vec!["spiffe://example.com/device-0001".to_string()]);
    }

    #[test]
    fn no_requested_extensions() {
        let key = testutil::ec_key(Nid::X9_62_PRIME256V1);
        let csr = CertificateRequest::from_der(&testutil::bare_csr_der(&key)).unwrap();

        assert!(csr.subject_alt_names().is_empty());
        assert!(csr.verify_signature().is_ok());
    }

    #[test]
    fn tampered_signature() {
        let key = testutil::ec_key(Nid::X9_62_PRIME256V1);
        let der = testutil::tamper_signature(&testutil::csr_der(&key));

        let csr = CertificateRequest::from_der(&der).unwrap();

        assert!(matches!(csr.verify_signature(), Err(Error::Csr(_))));
    }

    #[test]
    fn not_a_csr() {
        let r = CertificateRequest::from_der(b"\x30\x03\x02\x01\x00");

        assert!(matches!(r, Err(Error::Csr(_))));
    }

    #[test]
    fn trailing_bytes() {
        let key = testutil::ec_key(Nid::X9_62_PRIME256V1);
        let mut der = testutil::csr_der(&key);
        der.extend_from_slice(b"junk");

        assert!(CertificateRequest::from_der(&der).is_err());
    }
}
