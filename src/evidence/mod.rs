// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! The evidence module turns the loosely-typed "processed evidence" returned
//! by the verification service into a strongly-typed [`Evidence`] object for
//! a given [`Platform`].
//!
//! # Example
//!
//! ```
//! use proxy_attestation_server::evidence::{Evidence, Platform};
//!
//! let pe = serde_json::json!({
//!     "nonce": "AAECAw==",
//!     "PCR0": "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
//!     "user_data": "q83v",
//! });
//!
//! let e = Evidence::extract(Platform::Nitro, pe.as_object().unwrap())
//!     .expect("extracting Nitro evidence");
//!
//! assert_eq!(e.nonce(), &[0, 1, 2, 3]);
//! assert_eq!(e.measurement().len(), 32);
//! ```

pub use self::errors::Error;
pub use self::evidence::Evidence;
pub use self::nitro::NitroEvidence;
pub use self::platform::Platform;
pub use self::psa::PsaEvidence;
pub use self::psa::SwComponent;

mod common;
mod errors;
#[allow(clippy::module_inception)]
mod evidence;
mod nitro;
mod platform;
mod psa;
