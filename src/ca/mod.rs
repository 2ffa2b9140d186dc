// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Certificate authority side of the proxy: the immutable [`CaIdentity`]
//! loaded at startup, the [`CertificateRequest`] wrapper around a caller's
//! PKCS#10 CSR, and [`synthesize`], which mints the short-lived client
//! certificate carrying the attested measurement.

pub use self::certificate::synthesize;
pub use self::certificate::MEASUREMENT_EXTENSION_OID;
pub use self::certificate::VALIDITY_SECS;
pub use self::csr::CertificateRequest;
pub use self::csr::SubjectAltNames;
pub use self::errors::Error;
pub use self::identity::CaIdentity;

mod certificate;
mod csr;
mod errors;
mod identity;
