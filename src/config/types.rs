// config/types.rs
use serde::{Deserialize, Serialize};
use std::{fs, io};
use url::Url;

use crate::kas::{ExternalIpConfig, NamedCertificate, TlsSecurityProfile};

// The on-disk cluster document. Optional fields fall back to the built-in
// defaults when the parameters are resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub cluster_name: String,
    pub namespace: String,
    pub control_plane_version: String,
    pub control_plane_uid: Option<String>,
    pub advertise_address: Option<String>,
    pub api_server_port: Option<u16>,
    pub service_network: String,
    pub cluster_network: String,
    pub node_port_range: Option<String>,
    pub etcd_url: Option<String>,
    pub service_account_issuer_url: Option<String>,
    pub console_public_url: String,
    pub internal_registry_hostname: String,
    pub external_registry_hostnames: Vec<String>,
    pub default_node_selector: String,
    pub additional_cors_allowed_origins: Vec<String>,
    pub named_certificates: Vec<NamedCertificate>,
    pub tls_security_profile: TlsSecurityProfile,
    pub external_ip_config: Option<ExternalIpConfig>,
    pub cloud_provider: String,
    pub cloud_provider_config_name: String,
    pub audit_webhook_enabled: bool,
    pub disable_profiling: bool,
    pub feature_gates: Vec<String>,
}

impl ClusterConfig {
    pub fn default() -> Self {
        Self {
            cluster_name: "example".to_string(),
            namespace: "clusters-example".to_string(),
            control_plane_version: "4.12.0".to_string(),
            control_plane_uid: None,
            advertise_address: None,
            api_server_port: None,
            service_network: "172.31.0.0/16".to_string(),
            cluster_network: "10.132.0.0/14".to_string(),
            node_port_range: None,
            etcd_url: None,
            service_account_issuer_url: None,
            console_public_url: "".to_string(),
            internal_registry_hostname: "image-registry.openshift-image-registry.svc:5000"
                .to_string(),
            external_registry_hostnames: vec![],
            default_node_selector: "".to_string(),
            additional_cors_allowed_origins: vec![],
            named_certificates: vec![],
            tls_security_profile: TlsSecurityProfile::Intermediate,
            external_ip_config: None,
            cloud_provider: "".to_string(),
            cloud_provider_config_name: "".to_string(),
            audit_webhook_enabled: false,
            disable_profiling: false,
            feature_gates: vec!["APIPriorityAndFairness=true".to_string()],
        }
    }

    pub fn load_from_file(path: &str) -> io::Result<Self> {
        let config_str = fs::read_to_string(path)?;
        serde_json::from_str(&config_str).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn save_to_file(&self, path: &str) -> io::Result<()> {
        let config_str = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, config_str)
    }

    pub fn validate(&self) -> io::Result<()> {
        if self.service_network.is_empty() || self.cluster_network.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "service_network and cluster_network must be set",
            ));
        }
        if semver::Version::parse(&self.control_plane_version).is_err() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "invalid control plane version: {}",
                    self.control_plane_version
                ),
            ));
        }
        if let Some(issuer) = &self.service_account_issuer_url {
            if Url::parse(issuer).is_err() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid service account issuer URL: {}", issuer),
                ));
            }
        }
        Ok(())
    }
}
