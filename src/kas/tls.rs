// src/kas/tls.rs
use super::types::TlsSecurityProfile;

// Cipher lists follow the platform TLS security profiles. The serving info
// wants OpenSSL-style names for the TLS 1.2 suites and IANA names for the
// TLS 1.3 ones.
const MODERN_CIPHERS: &[&str] = &[
    "TLS_AES_128_GCM_SHA256",
    "TLS_AES_256_GCM_SHA384",
    "TLS_CHACHA20_POLY1305_SHA256",
];

const INTERMEDIATE_CIPHERS: &[&str] = &[
    "TLS_AES_128_GCM_SHA256",
    "TLS_AES_256_GCM_SHA384",
    "TLS_CHACHA20_POLY1305_SHA256",
    "ECDHE-ECDSA-AES128-GCM-SHA256",
    "ECDHE-RSA-AES128-GCM-SHA256",
    "ECDHE-ECDSA-AES256-GCM-SHA384",
    "ECDHE-RSA-AES256-GCM-SHA384",
    "ECDHE-ECDSA-CHACHA20-POLY1305",
    "ECDHE-RSA-CHACHA20-POLY1305",
    "DHE-RSA-AES128-GCM-SHA256",
    "DHE-RSA-AES256-GCM-SHA384",
];

const OLD_CIPHERS: &[&str] = &[
    "TLS_AES_128_GCM_SHA256",
    "TLS_AES_256_GCM_SHA384",
    "TLS_CHACHA20_POLY1305_SHA256",
    "ECDHE-ECDSA-AES128-GCM-SHA256",
    "ECDHE-RSA-AES128-GCM-SHA256",
    "ECDHE-ECDSA-AES256-GCM-SHA384",
    "ECDHE-RSA-AES256-GCM-SHA384",
    "ECDHE-ECDSA-CHACHA20-POLY1305",
    "ECDHE-RSA-CHACHA20-POLY1305",
    "DHE-RSA-AES128-GCM-SHA256",
    "DHE-RSA-AES256-GCM-SHA384",
    "DHE-RSA-CHACHA20-POLY1305",
    "ECDHE-ECDSA-AES128-SHA256",
    "ECDHE-RSA-AES128-SHA256",
    "ECDHE-ECDSA-AES128-SHA",
    "ECDHE-RSA-AES128-SHA",
    "ECDHE-ECDSA-AES256-SHA384",
    "ECDHE-RSA-AES256-SHA384",
    "ECDHE-ECDSA-AES256-SHA",
    "ECDHE-RSA-AES256-SHA",
    "DHE-RSA-AES128-SHA256",
    "DHE-RSA-AES256-SHA256",
    "AES128-GCM-SHA256",
    "AES256-GCM-SHA384",
    "AES128-SHA256",
    "AES256-SHA256",
    "AES128-SHA",
    "AES256-SHA",
    "DES-CBC3-SHA",
];

pub fn cipher_suites(profile: &TlsSecurityProfile) -> Vec<String> {
    let ciphers: Vec<String> = match profile {
        TlsSecurityProfile::Old => OLD_CIPHERS.iter().map(|c| c.to_string()).collect(),
        TlsSecurityProfile::Intermediate => {
            INTERMEDIATE_CIPHERS.iter().map(|c| c.to_string()).collect()
        }
        TlsSecurityProfile::Modern => MODERN_CIPHERS.iter().map(|c| c.to_string()).collect(),
        TlsSecurityProfile::Custom { ciphers, .. } => ciphers.clone(),
    };
    ciphers
}

pub fn min_tls_version(profile: &TlsSecurityProfile) -> String {
    match profile {
        TlsSecurityProfile::Old => "VersionTLS10".to_string(),
        TlsSecurityProfile::Intermediate => "VersionTLS12".to_string(),
        TlsSecurityProfile::Modern => "VersionTLS13".to_string(),
        TlsSecurityProfile::Custom {
            min_tls_version, ..
        } => min_tls_version.clone(),
    }
}
