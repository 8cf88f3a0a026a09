// src/kas/config.rs
use semver::Version;
use serde::Serialize;

use super::admission::{admission_config, admission_plugins, AdmissionConfig};
use super::args::KubeApiServerArgs;
use super::cloud::cloud_provider_config_path;
use super::operations::ConfigOperationError;
use super::tls::{cipher_suites, min_tls_version};
use super::types::{KubeApiServerParams, NamedCertificate};
use super::volumes::{self, cpath, Volume};
use crate::types::{ConfigMap, OwnerRef};

pub const CONFIG_API_VERSION: &str = "kubecontrolplane.config.openshift.io/v1";
pub const CONFIG_KIND: &str = "KubeAPIServerConfig";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KubeApiServerConfig {
    pub api_version: String,
    pub kind: String,
    pub admission: AdmissionConfig,
    pub serving_info: ServingInfo,
    pub cors_allowed_origins: Vec<String>,
    pub auth_config: AuthConfig,
    #[serde(rename = "consolePublicURL")]
    pub console_public_url: String,
    pub image_policy_config: ImagePolicyConfig,
    pub project_config: ProjectConfig,
    pub service_account_public_key_files: Vec<String>,
    pub services_subnet: String,
    pub api_server_arguments: KubeApiServerArgs,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServingInfo {
    pub bind_address: String,
    pub bind_network: String,
    pub cert_file: String,
    pub key_file: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub named_certificates: Vec<NamedCertificateInfo>,
    pub cipher_suites: Vec<String>,
    #[serde(rename = "minTLSVersion")]
    pub min_tls_version: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NamedCertificateInfo {
    pub names: Vec<String>,
    pub cert_file: String,
    pub key_file: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    pub oauth_metadata_file: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImagePolicyConfig {
    pub internal_registry_hostname: String,
    pub external_registry_hostnames: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub default_node_selector: String,
}

// Serializes the generated document into the config map under the well-known
// data key, stamping ownership on the way.
pub fn reconcile_config(
    config_map: &mut ConfigMap,
    owner_ref: &OwnerRef,
    params: &KubeApiServerParams,
    version: &Version,
) -> Result<(), ConfigOperationError> {
    owner_ref.apply_to(&mut config_map.metadata);
    let config = generate_config(params, version);
    let serialized = serde_json::to_string(&config).map_err(|e| {
        ConfigOperationError::Serialization(format!(
            "failed to serialize kube apiserver config: {}",
            e
        ))
    })?;
    config_map
        .data
        .insert(volumes::KUBE_APISERVER_CONFIG_KEY.to_string(), serialized);
    Ok(())
}

pub fn generate_config(p: &KubeApiServerParams, version: &Version) -> KubeApiServerConfig {
    KubeApiServerConfig {
        api_version: CONFIG_API_VERSION.to_string(),
        kind: CONFIG_KIND.to_string(),
        admission: admission_config(
            p.external_ip_config.as_ref(),
            &p.cluster_network,
            &p.service_network,
        ),
        serving_info: ServingInfo {
            bind_address: format!("0.0.0.0:{}", p.api_server_port),
            bind_network: "tcp4".to_string(),
            cert_file: cpath(Volume::ServerCert, volumes::TLS_CERT_KEY),
            key_file: cpath(Volume::ServerCert, volumes::TLS_PRIVATE_KEY_KEY),
            named_certificates: named_certificates(&p.named_certificates),
            cipher_suites: cipher_suites(&p.tls_security_profile),
            min_tls_version: min_tls_version(&p.tls_security_profile),
        },
        cors_allowed_origins: cors_allowed_origins(&p.additional_cors_allowed_origins),
        auth_config: AuthConfig {
            oauth_metadata_file: cpath(Volume::OauthMetadata, volumes::OAUTH_METADATA_CONFIG_KEY),
        },
        console_public_url: p.console_public_url.clone(),
        image_policy_config: ImagePolicyConfig {
            internal_registry_hostname: p.internal_registry_hostname.clone(),
            external_registry_hostnames: p.external_registry_hostnames.clone(),
        },
        project_config: ProjectConfig {
            default_node_selector: p.default_node_selector.clone(),
        },
        service_account_public_key_files: vec![cpath(
            Volume::ServiceAccountKey,
            volumes::SERVICE_SIGNER_PUBLIC_KEY,
        )],
        services_subnet: p.service_network.clone(),
        api_server_arguments: generate_args(p, version),
    }
}

fn generate_args(p: &KubeApiServerParams, version: &Version) -> KubeApiServerArgs {
    let mut args = KubeApiServerArgs::new();
    args.set("advertise-address", &p.advertise_address);
    args.set("allow-privileged", "true");
    args.set("anonymous-auth", "true");
    args.set("api-audiences", &p.service_account_issuer_url);
    args.set("audit-log-format", "json");
    args.set("audit-log-maxbackup", "10");
    args.set("audit-log-maxsize", "100");
    args.set(
        "audit-log-path",
        &cpath(Volume::WorkLogs, volumes::AUDIT_LOG_FILE),
    );
    args.set(
        "audit-policy-file",
        &cpath(Volume::AuditConfig, volumes::AUDIT_POLICY_CONFIG_KEY),
    );
    args.set(
        "authentication-token-webhook-config-file",
        &cpath(Volume::AuthTokenWebhookConfig, volumes::KUBECONFIG_KEY),
    );
    args.set("authentication-token-webhook-version", "v1");
    args.set_list(
        "authorization-mode",
        &["Scope", "SystemMasters", "RBAC", "Node"],
    );
    args.set(
        "client-ca-file",
        &cpath(Volume::ClientCa, volumes::CA_SIGNER_CERT_KEY),
    );
    if !p.cloud_provider_config_name.is_empty() {
        args.set(
            "cloud-config",
            &cloud_provider_config_path(&p.cloud_provider_config_name, &p.cloud_provider),
        );
    }
    if !p.cloud_provider.is_empty() {
        args.set("cloud-provider", &p.cloud_provider);
    }
    if p.audit_webhook_enabled {
        args.set(
            "audit-webhook-config-file",
            &cpath(Volume::AuditWebhookConfig, volumes::KUBECONFIG_KEY),
        );
        args.set("audit-webhook-mode", "batch");
    }
    if p.disable_profiling {
        args.set("profiling", "false");
    }
    args.set(
        "egress-selector-config-file",
        &cpath(
            Volume::EgressSelectorConfig,
            volumes::EGRESS_SELECTOR_CONFIG_KEY,
        ),
    );
    args.set_list("enable-admission-plugins", &admission_plugins());
    if version.minor == 10 {
        // PodSecurity breaks conformance on 4.10 and stays off there
        args.set("disable-admission-plugins", "PodSecurity");
    }
    args.set("enable-aggregator-routing", "true");
    args.set("enable-logs-handler", "false");
    args.set("endpoint-reconciler-type", "lease");
    args.set(
        "etcd-cafile",
        &cpath(Volume::EtcdClientCert, volumes::ETCD_CLIENT_CA_KEY),
    );
    args.set(
        "etcd-certfile",
        &cpath(Volume::EtcdClientCert, volumes::ETCD_CLIENT_CERT_KEY),
    );
    args.set(
        "etcd-keyfile",
        &cpath(Volume::EtcdClientCert, volumes::ETCD_CLIENT_KEY_KEY),
    );
    args.set("etcd-prefix", "kubernetes.io");
    args.set("etcd-servers", &p.etcd_url);
    args.set("event-ttl", "3h");
    args.set_list("feature-gates", &p.feature_gates);
    args.set("goaway-chance", "0");
    args.set("http2-max-streams-per-connection", "2000");
    args.set(
        "kubelet-certificate-authority",
        &cpath(Volume::KubeletClientCa, volumes::CA_SIGNER_CERT_KEY),
    );
    args.set(
        "kubelet-client-certificate",
        &cpath(Volume::KubeletClientCert, volumes::TLS_CERT_KEY),
    );
    args.set(
        "kubelet-client-key",
        &cpath(Volume::KubeletClientCert, volumes::TLS_PRIVATE_KEY_KEY),
    );
    args.set("kubelet-preferred-address-types", "InternalIP");
    args.set("kubelet-read-only-port", "0");
    args.set("kubernetes-service-node-port", "0");
    args.set("max-mutating-requests-inflight", "1000");
    args.set("max-requests-inflight", "3000");
    args.set("min-request-timeout", "3600");
    args.set(
        "proxy-client-cert-file",
        &cpath(Volume::AggregatorCert, volumes::TLS_CERT_KEY),
    );
    args.set(
        "proxy-client-key-file",
        &cpath(Volume::AggregatorCert, volumes::TLS_PRIVATE_KEY_KEY),
    );
    args.set_list(
        "requestheader-allowed-names",
        &request_header_allowed_names(),
    );
    args.set(
        "requestheader-client-ca-file",
        &cpath(Volume::AggregatorCa, volumes::CA_SIGNER_CERT_KEY),
    );
    args.set("requestheader-extra-headers-prefix", "X-Remote-Extra-");
    args.set("requestheader-group-headers", "X-Remote-Group");
    args.set("requestheader-username-headers", "X-Remote-User");
    args.set(
        "runtime-config",
        "flowcontrol.apiserver.k8s.io/v1alpha1=true",
    );
    args.set("service-account-issuer", &p.service_account_issuer_url);
    args.set(
        "service-account-jwks-uri",
        &jwks_url(&p.service_account_issuer_url),
    );
    args.set("service-account-lookup", "true");
    args.set(
        "service-account-signing-key-file",
        &cpath(Volume::ServiceAccountKey, volumes::SERVICE_SIGNER_PRIVATE_KEY),
    );
    args.set("service-node-port-range", &p.node_port_range);
    args.set("shutdown-delay-duration", "70s");
    args.set("shutdown-send-retry-after", "true");
    args.set("storage-backend", "etcd3");
    args.set(
        "storage-media-type",
        "application/vnd.kubernetes.protobuf",
    );
    args.set(
        "tls-cert-file",
        &cpath(Volume::ServerCert, volumes::TLS_CERT_KEY),
    );
    args.set(
        "tls-private-key-file",
        &cpath(Volume::ServerCert, volumes::TLS_PRIVATE_KEY_KEY),
    );
    args
}

fn named_certificates(certs: &[NamedCertificate]) -> Vec<NamedCertificateInfo> {
    certs
        .iter()
        .enumerate()
        .map(|(i, cert)| NamedCertificateInfo {
            names: cert.names.clone(),
            cert_file: format!(
                "{}-{}/{}",
                volumes::NAMED_CERT_MOUNT_PATH_PREFIX,
                i + 1,
                volumes::TLS_CERT_KEY
            ),
            key_file: format!(
                "{}-{}/{}",
                volumes::NAMED_CERT_MOUNT_PATH_PREFIX,
                i + 1,
                volumes::TLS_PRIVATE_KEY_KEY
            ),
        })
        .collect()
}

fn cors_allowed_origins(additional: &[String]) -> Vec<String> {
    let mut origins = vec![
        "//127\\.0\\.0\\.1(:|$)".to_string(),
        "//localhost(:|$)".to_string(),
    ];
    origins.extend(additional.iter().cloned());
    origins
}

fn request_header_allowed_names() -> Vec<&'static str> {
    vec![
        "kube-apiserver-proxy",
        "system:kube-apiserver-proxy",
        "system:openshift-aggregator",
    ]
}

fn jwks_url(issuer_url: &str) -> String {
    format!("{}/openid/v1/jwks", issuer_url)
}
