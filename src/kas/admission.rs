// src/kas/admission.rs
use serde::Serialize;
use std::collections::BTreeMap;

use super::types::ExternalIpConfig;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionConfig {
    pub plugin_config: BTreeMap<String, AdmissionPluginConfig>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionPluginConfig {
    pub location: String,
    pub configuration: PluginConfiguration,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum PluginConfiguration {
    ExternalIpRanger(ExternalIpRangerConfig),
    RestrictedEndpoints(RestrictedEndpointsConfig),
    PodSecurity(PodSecurityConfiguration),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalIpRangerConfig {
    pub api_version: String,
    pub kind: String,
    #[serde(rename = "externalIPNetworkCIDRs")]
    pub external_ip_network_cidrs: Vec<String>,
    #[serde(rename = "allowIngressIP")]
    pub allow_ingress_ip: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RestrictedEndpointsConfig {
    pub api_version: String,
    pub kind: String,
    #[serde(rename = "restrictedCIDRs")]
    pub restricted_cidrs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodSecurityConfiguration {
    pub api_version: String,
    pub kind: String,
    pub defaults: PodSecurityDefaults,
    pub exemptions: PodSecurityExemptions,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct PodSecurityDefaults {
    pub enforce: String,
    pub enforce_version: String,
    pub audit: String,
    pub audit_version: String,
    pub warn: String,
    pub warn_version: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PodSecurityExemptions {
    pub usernames: Vec<String>,
}

// Assembles the plugin configuration map carried inside the generated
// document: external IP filtering, endpoint restriction for the cluster and
// service networks, and the pod security baseline.
pub fn admission_config(
    external_ip_config: Option<&ExternalIpConfig>,
    cluster_network: &str,
    service_network: &str,
) -> AdmissionConfig {
    let mut plugin_config = BTreeMap::new();
    plugin_config.insert(
        "network.openshift.io/ExternalIPRanger".to_string(),
        AdmissionPluginConfig {
            location: String::new(),
            configuration: PluginConfiguration::ExternalIpRanger(external_ip_ranger_config(
                external_ip_config,
            )),
        },
    );
    plugin_config.insert(
        "network.openshift.io/RestrictedEndpointsAdmission".to_string(),
        AdmissionPluginConfig {
            location: String::new(),
            configuration: PluginConfiguration::RestrictedEndpoints(
                restricted_endpoints_admission(cluster_network, service_network),
            ),
        },
    );
    plugin_config.insert(
        "PodSecurity".to_string(),
        AdmissionPluginConfig {
            location: String::new(),
            configuration: PluginConfiguration::PodSecurity(pod_security_config()),
        },
    );
    AdmissionConfig { plugin_config }
}

pub fn external_ip_ranger_config(
    external_ip_config: Option<&ExternalIpConfig>,
) -> ExternalIpRangerConfig {
    let mut cidrs = Vec::new();
    if let Some(config) = external_ip_config {
        if let Some(policy) = &config.policy {
            // Rejections are spelled with a leading "!" in the admission
            // plugin's CIDR list.
            for cidr in &policy.rejected_cidrs {
                cidrs.push(format!("!{}", cidr));
            }
            cidrs.extend(policy.allowed_cidrs.iter().cloned());
        }
    }
    let allow_ingress_ip =
        external_ip_config.map_or(false, |config| !config.auto_assign_cidrs.is_empty());
    ExternalIpRangerConfig {
        api_version: "network.openshift.io/v1".to_string(),
        kind: "ExternalIPRangerAdmissionConfig".to_string(),
        external_ip_network_cidrs: cidrs,
        allow_ingress_ip,
    }
}

pub fn restricted_endpoints_admission(
    cluster_network: &str,
    service_network: &str,
) -> RestrictedEndpointsConfig {
    RestrictedEndpointsConfig {
        api_version: "network.openshift.io/v1".to_string(),
        kind: "RestrictedEndpointsAdmissionConfig".to_string(),
        restricted_cidrs: vec![cluster_network.to_string(), service_network.to_string()],
    }
}

pub fn pod_security_config() -> PodSecurityConfiguration {
    PodSecurityConfiguration {
        api_version: "pod-security.admission.config.k8s.io/v1beta1".to_string(),
        kind: "PodSecurityConfiguration".to_string(),
        defaults: PodSecurityDefaults {
            enforce: "privileged".to_string(),
            enforce_version: "latest".to_string(),
            audit: "restricted".to_string(),
            audit_version: "latest".to_string(),
            warn: "restricted".to_string(),
            warn_version: "latest".to_string(),
        },
        exemptions: PodSecurityExemptions {
            usernames: vec!["system:serviceaccount:openshift-infra:build-controller".to_string()],
        },
    }
}

pub fn admission_plugins() -> Vec<&'static str> {
    vec![
        "CertificateApproval",
        "CertificateSigning",
        "CertificateSubjectRestriction",
        "DefaultIngressClass",
        "DefaultStorageClass",
        "DefaultTolerationSeconds",
        "LimitRanger",
        "MutatingAdmissionWebhook",
        "NamespaceLifecycle",
        "NodeRestriction",
        "OwnerReferencesPermissionEnforcement",
        "PersistentVolumeClaimResize",
        "PersistentVolumeLabel",
        "PodNodeSelector",
        "PodTolerationRestriction",
        "Priority",
        "ResourceQuota",
        "RuntimeClass",
        "ServiceAccount",
        "StorageObjectInUseProtection",
        "TaintNodesByCondition",
        "ValidatingAdmissionWebhook",
        "authorization.openshift.io/RestrictSubjectBindings",
        "authorization.openshift.io/ValidateRoleBindingRestriction",
        "config.openshift.io/DenyDeleteClusterConfiguration",
        "config.openshift.io/ValidateAPIServer",
        "config.openshift.io/ValidateAuthentication",
        "config.openshift.io/ValidateConsole",
        "config.openshift.io/ValidateFeatureGate",
        "config.openshift.io/ValidateImage",
        "config.openshift.io/ValidateOAuth",
        "config.openshift.io/ValidateProject",
        "config.openshift.io/ValidateScheduler",
        "image.openshift.io/ImagePolicy",
        "network.openshift.io/ExternalIPRanger",
        "network.openshift.io/RestrictedEndpointsAdmission",
        "quota.openshift.io/ClusterResourceQuota",
        "quota.openshift.io/ValidateClusterResourceQuota",
        "route.openshift.io/IngressAdmission",
        "scheduling.openshift.io/OriginPodNodeEnvironment",
        "security.openshift.io/DefaultSecurityContextConstraints",
        "security.openshift.io/SCCExecRestrictions",
        "security.openshift.io/SecurityContextConstraint",
        "security.openshift.io/ValidateSecurityContextConstraints",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kas::types::ExternalIpPolicy;

    #[test]
    fn test_external_ip_ranger_without_config() {
        let config = external_ip_ranger_config(None);
        assert!(config.external_ip_network_cidrs.is_empty());
        assert!(!config.allow_ingress_ip);
        assert_eq!(config.kind, "ExternalIPRangerAdmissionConfig");
    }

    #[test]
    fn test_external_ip_ranger_rejects_before_allows() {
        let external = ExternalIpConfig {
            auto_assign_cidrs: vec![],
            policy: Some(ExternalIpPolicy {
                allowed_cidrs: vec!["192.168.0.0/16".to_string()],
                rejected_cidrs: vec!["10.0.0.0/8".to_string()],
            }),
        };
        let config = external_ip_ranger_config(Some(&external));
        assert_eq!(
            config.external_ip_network_cidrs,
            vec!["!10.0.0.0/8".to_string(), "192.168.0.0/16".to_string()]
        );
        assert!(!config.allow_ingress_ip);
    }

    #[test]
    fn test_external_ip_ranger_allows_ingress_with_auto_assign() {
        let external = ExternalIpConfig {
            auto_assign_cidrs: vec!["172.29.0.0/16".to_string()],
            policy: None,
        };
        let config = external_ip_ranger_config(Some(&external));
        assert!(config.allow_ingress_ip);
        assert!(config.external_ip_network_cidrs.is_empty());
    }

    #[test]
    fn test_restricted_endpoints_covers_both_networks() {
        let config = restricted_endpoints_admission("10.132.0.0/14", "172.31.0.0/16");
        assert_eq!(
            config.restricted_cidrs,
            vec!["10.132.0.0/14".to_string(), "172.31.0.0/16".to_string()]
        );
    }

    #[test]
    fn test_pod_security_serializes_kebab_case_versions() {
        let serialized = serde_json::to_value(pod_security_config()).unwrap();
        assert_eq!(serialized["defaults"]["enforce"], "privileged");
        assert_eq!(serialized["defaults"]["enforce-version"], "latest");
        assert_eq!(serialized["defaults"]["warn"], "restricted");
        assert_eq!(
            serialized["exemptions"]["usernames"][0],
            "system:serviceaccount:openshift-infra:build-controller"
        );
    }

    #[test]
    fn test_admission_config_carries_all_three_plugins() {
        let config = admission_config(None, "10.132.0.0/14", "172.31.0.0/16");
        assert_eq!(config.plugin_config.len(), 3);
        assert!(config.plugin_config.contains_key("PodSecurity"));
        assert!(config
            .plugin_config
            .contains_key("network.openshift.io/ExternalIPRanger"));
        assert!(config
            .plugin_config
            .contains_key("network.openshift.io/RestrictedEndpointsAdmission"));
    }

    #[test]
    fn test_admission_plugins_list() {
        let plugins = admission_plugins();
        assert_eq!(plugins.len(), 44);
        assert!(plugins.contains(&"NodeRestriction"));
        assert!(plugins.contains(&"security.openshift.io/SecurityContextConstraint"));
        // the list stays sorted by name
        let mut sorted = plugins.clone();
        sorted.sort();
        assert_eq!(plugins, sorted);
    }
}
