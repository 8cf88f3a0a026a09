// src/kas/cloud.rs
use super::volumes::{cpath, Volume};

// Each provider mounts its config under a provider-specific file name.
pub fn provider_config_key(provider: &str) -> &'static str {
    match provider {
        "aws" => "aws.conf",
        "azure" => "azure.json",
        _ => "config",
    }
}

pub fn cloud_provider_config_path(config_name: &str, provider: &str) -> String {
    if config_name.is_empty() {
        return String::new();
    }
    cpath(Volume::CloudConfig, provider_config_key(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_config_key() {
        assert_eq!(provider_config_key("aws"), "aws.conf");
        assert_eq!(provider_config_key("azure"), "azure.json");
        assert_eq!(provider_config_key("ibmcloud"), "config");
    }

    #[test]
    fn test_config_path_empty_without_config_name() {
        assert_eq!(cloud_provider_config_path("", "aws"), "");
    }

    #[test]
    fn test_config_path_uses_provider_key() {
        assert_eq!(
            cloud_provider_config_path("aws-cloud-config", "aws"),
            "/etc/kubernetes/cloud/aws.conf"
        );
    }
}
