// src/kas/types.rs
use serde::{Deserialize, Serialize};

use crate::config::ClusterConfig;

pub const DEFAULT_API_SERVER_PORT: u16 = 6443;
pub const DEFAULT_ETCD_PORT: u16 = 2379;
pub const DEFAULT_ADVERTISE_ADDRESS: &str = "172.20.0.1";
pub const DEFAULT_NODE_PORT_RANGE: &str = "30000-32767";
pub const DEFAULT_SERVICE_ACCOUNT_ISSUER: &str = "https://kubernetes.default.svc";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedCertificate {
    pub names: Vec<String>,
    pub secret_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExternalIpPolicy {
    pub allowed_cidrs: Vec<String>,
    pub rejected_cidrs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExternalIpConfig {
    pub auto_assign_cidrs: Vec<String>,
    pub policy: Option<ExternalIpPolicy>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum TlsSecurityProfile {
    Old,
    Intermediate,
    Modern,
    Custom {
        min_tls_version: String,
        ciphers: Vec<String>,
    },
}

// Everything config generation needs, resolved from the cluster document
// with defaults already applied.
#[derive(Debug, Clone)]
pub struct KubeApiServerParams {
    pub advertise_address: String,
    pub api_server_port: u16,
    pub service_network: String,
    pub cluster_network: String,
    pub node_port_range: String,
    pub etcd_url: String,
    pub service_account_issuer_url: String,
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

impl KubeApiServerParams {
    pub fn from_cluster(config: &ClusterConfig) -> Self {
        Self {
            advertise_address: config
                .advertise_address
                .clone()
                .unwrap_or_else(|| DEFAULT_ADVERTISE_ADDRESS.to_string()),
            api_server_port: config.api_server_port.unwrap_or(DEFAULT_API_SERVER_PORT),
            service_network: config.service_network.clone(),
            cluster_network: config.cluster_network.clone(),
            node_port_range: config
                .node_port_range
                .clone()
                .unwrap_or_else(|| DEFAULT_NODE_PORT_RANGE.to_string()),
            etcd_url: config
                .etcd_url
                .clone()
                .unwrap_or_else(|| format!("https://etcd-client:{}", DEFAULT_ETCD_PORT)),
            service_account_issuer_url: config
                .service_account_issuer_url
                .clone()
                .unwrap_or_else(|| DEFAULT_SERVICE_ACCOUNT_ISSUER.to_string()),
            console_public_url: config.console_public_url.clone(),
            internal_registry_hostname: config.internal_registry_hostname.clone(),
            external_registry_hostnames: config.external_registry_hostnames.clone(),
            default_node_selector: config.default_node_selector.clone(),
            additional_cors_allowed_origins: config.additional_cors_allowed_origins.clone(),
            named_certificates: config.named_certificates.clone(),
            tls_security_profile: config.tls_security_profile.clone(),
            external_ip_config: config.external_ip_config.clone(),
            cloud_provider: config.cloud_provider.clone(),
            cloud_provider_config_name: config.cloud_provider_config_name.clone(),
            audit_webhook_enabled: config.audit_webhook_enabled,
            disable_profiling: config.disable_profiling,
            feature_gates: config.feature_gates.clone(),
        }
    }
}
