// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Process configuration.  Every option can also be set from the environment.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(author, version, long_about = None,
    about = "Issue short-lived client certificates to devices that prove, via \
    PSA or AWS Nitro attestation, that they hold the key in their CSR")]
pub struct Config {
    /// Address the HTTP API listens on
    #[arg(short, long, env = "PROXY_LISTEN", default_value = "127.0.0.1:3030")]
    pub listen: SocketAddr,

    /// PEM-encoded CA certificate
    #[arg(long, env = "PROXY_CA_CERT", default_value = "./CACert.pem")]
    pub ca_cert: PathBuf,

    /// PEM-encoded CA private key (SEC1 or PKCS#8)
    #[arg(long, env = "PROXY_CA_KEY", default_value = "./CAKey.pem")]
    pub ca_key: PathBuf,

    /// Base URL of the attestation verification service
    #[arg(long, env = "PROXY_VERIFIER_URL", default_value = "http://127.0.0.1:8080")]
    pub verifier_url: String,

    /// Seconds to wait for an appraisal
    #[arg(long, env = "PROXY_VERIFIER_TIMEOUT", default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..))]
    pub verifier_timeout: u64,

    /// Tenant on whose behalf evidence is appraised
    #[arg(long, env = "PROXY_TENANT_ID", default_value = "0")]
    pub tenant_id: String,

    /// Seconds a session stays open after Start
    #[arg(long, env = "PROXY_SESSION_TTL", default_value_t = 300,
        value_parser = clap::value_parser!(u64).range(1..))]
    pub session_ttl: u64,

    /// Upper bound on concurrently open sessions
    #[arg(long, env = "PROXY_MAX_SESSIONS", default_value_t = 65536)]
    pub max_sessions: usize,
}

impl Config {
    pub fn verifier_timeout(&self) -> Duration {
        Duration::from_secs(self.verifier_timeout)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl)
    }
}
