// src/kas/volumes.rs

// Data keys inside generated objects and mounted files.
pub const KUBE_APISERVER_CONFIG_KEY: &str = "config.json";
pub const OAUTH_METADATA_CONFIG_KEY: &str = "oauthMetadata.json";
pub const AUDIT_LOG_FILE: &str = "audit.log";
pub const AUDIT_POLICY_CONFIG_KEY: &str = "policy.yaml";
pub const EGRESS_SELECTOR_CONFIG_KEY: &str = "config.yaml";
pub const KUBECONFIG_KEY: &str = "kubeconfig";

// File names inside certificate and key mounts.
pub const TLS_CERT_KEY: &str = "tls.crt";
pub const TLS_PRIVATE_KEY_KEY: &str = "tls.key";
pub const CA_SIGNER_CERT_KEY: &str = "ca.crt";
pub const ETCD_CLIENT_CA_KEY: &str = "etcd-client-ca.crt";
pub const ETCD_CLIENT_CERT_KEY: &str = "etcd-client.crt";
pub const ETCD_CLIENT_KEY_KEY: &str = "etcd-client.key";
pub const SERVICE_SIGNER_PUBLIC_KEY: &str = "service-account.pub";
pub const SERVICE_SIGNER_PRIVATE_KEY: &str = "service-account.key";

// Named serving certificates are mounted one directory per entry,
// numbered from 1: <prefix>-1, <prefix>-2, ...
pub const NAMED_CERT_MOUNT_PATH_PREFIX: &str = "/etc/kubernetes/certs/named";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Volume {
    ServerCert,
    AggregatorCert,
    AggregatorCa,
    ClientCa,
    KubeletClientCa,
    KubeletClientCert,
    EtcdClientCert,
    ServiceAccountKey,
    OauthMetadata,
    AuditConfig,
    AuthTokenWebhookConfig,
    EgressSelectorConfig,
    CloudConfig,
    AuditWebhookConfig,
    WorkLogs,
}

impl Volume {
    pub fn mount_path(&self) -> &'static str {
        match self {
            Volume::ServerCert => "/etc/kubernetes/certs/server",
            Volume::AggregatorCert => "/etc/kubernetes/certs/aggregator",
            Volume::AggregatorCa => "/etc/kubernetes/certs/aggregator-ca",
            Volume::ClientCa => "/etc/kubernetes/certs/client-ca",
            Volume::KubeletClientCa => "/etc/kubernetes/certs/kubelet-ca",
            Volume::KubeletClientCert => "/etc/kubernetes/certs/kubelet",
            Volume::EtcdClientCert => "/etc/kubernetes/certs/etcd",
            Volume::ServiceAccountKey => "/etc/kubernetes/secrets/svcacct-key",
            Volume::OauthMetadata => "/etc/kubernetes/oauth",
            Volume::AuditConfig => "/etc/kubernetes/audit",
            Volume::AuthTokenWebhookConfig => "/etc/kubernetes/auth-token-webhook",
            Volume::EgressSelectorConfig => "/etc/kubernetes/egress-selector",
            Volume::CloudConfig => "/etc/kubernetes/cloud",
            Volume::AuditWebhookConfig => "/etc/kubernetes/auditwebhook",
            Volume::WorkLogs => "/var/log/kube-apiserver",
        }
    }
}

pub fn cpath(volume: Volume, file: &str) -> String {
    format!("{}/{}", volume.mount_path(), file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpath_joins_mount_and_file() {
        assert_eq!(
            cpath(Volume::ServerCert, TLS_CERT_KEY),
            "/etc/kubernetes/certs/server/tls.crt"
        );
        assert_eq!(
            cpath(Volume::WorkLogs, AUDIT_LOG_FILE),
            "/var/log/kube-apiserver/audit.log"
        );
    }

    #[test]
    fn test_mount_paths_are_distinct() {
        let volumes = [
            Volume::ServerCert,
            Volume::AggregatorCert,
            Volume::AggregatorCa,
            Volume::ClientCa,
            Volume::KubeletClientCa,
            Volume::KubeletClientCert,
            Volume::EtcdClientCert,
            Volume::ServiceAccountKey,
            Volume::OauthMetadata,
            Volume::AuditConfig,
            Volume::AuthTokenWebhookConfig,
            Volume::EgressSelectorConfig,
            Volume::CloudConfig,
            Volume::AuditWebhookConfig,
            Volume::WorkLogs,
        ];
        for (i, a) in volumes.iter().enumerate() {
            for b in &volumes[i + 1..] {
                assert_ne!(a.mount_path(), b.mount_path());
            }
        }
    }
}
