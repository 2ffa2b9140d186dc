// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! Interface to the external verification service.  The proxy does not
//! appraise attestation tokens itself: it forwards them to a Veraison
//! verifier and consumes the resulting [`Appraisal`].

pub use self::appraisal::Appraisal;
pub use self::errors::Error;
pub use self::iverifier::IVerifier;
pub use self::vts::VtsClient;

mod appraisal;
mod errors;
mod iverifier;
mod vts;
