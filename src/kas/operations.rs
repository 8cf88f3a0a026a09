// src/kas/operations.rs

use semver::Version;
use std::{fs, io, path::PathBuf};

use crate::config::ClusterConfig;
use crate::types::{ConfigMap, OwnerRef};
use crate::utils::logging::Logger;

use super::config::{generate_config, reconcile_config};
use super::types::KubeApiServerParams;
use super::volumes;

pub const CONFIG_MAP_NAME: &str = "kas-config";
pub const MANIFEST_FILE: &str = "kube-apiserver-config.yaml";

#[derive(Debug)]
pub enum ConfigOperationError {
    IoError(io::Error),
    InvalidConfig(String),
    Serialization(String),
}

impl From<ConfigOperationError> for io::Error {
    fn from(error: ConfigOperationError) -> Self {
        match error {
            ConfigOperationError::IoError(e) => {
                io::Error::new(e.kind(), format!("Config operation IO error: {}", e))
            }
            ConfigOperationError::InvalidConfig(s) => io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid configuration: {}", s),
            ),
            ConfigOperationError::Serialization(s) => io::Error::new(
                io::ErrorKind::Other,
                format!("Serialization error: {}", s),
            ),
        }
    }
}

impl std::fmt::Display for ConfigOperationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO Error: {}", e),
            Self::InvalidConfig(s) => write!(f, "Invalid Configuration: {}", s),
            Self::Serialization(s) => write!(f, "Serialization Error: {}", s),
        }
    }
}

impl std::error::Error for ConfigOperationError {}

impl From<io::Error> for ConfigOperationError {
    fn from(error: io::Error) -> Self {
        ConfigOperationError::IoError(error)
    }
}

pub struct ConfigOperations {
    logger: Box<dyn Logger>,
}

impl ConfigOperations {
    pub fn new(logger: Box<dyn Logger>) -> Self {
        Self { logger }
    }

    pub fn log(&mut self, message: &str) {
        self.logger.log(message);
    }

    pub fn debug_log(&mut self, message: &str) {
        self.logger.debug_log(message);
    }

    // Generates the kube-apiserver config map manifest plus the raw document
    // and writes both into output_dir. Returns the written paths.
    pub fn generate(
        &mut self,
        cluster: &ClusterConfig,
        output_dir: &str,
    ) -> Result<Vec<PathBuf>, ConfigOperationError> {
        self.log(&format!(
            "Generating kube-apiserver configuration for cluster {}",
            cluster.cluster_name
        ));

        let version = Version::parse(&cluster.control_plane_version).map_err(|e| {
            ConfigOperationError::InvalidConfig(format!(
                "invalid control plane version {}: {}",
                cluster.control_plane_version, e
            ))
        })?;
        self.debug_log(&format!("control plane version {}", version));

        let params = KubeApiServerParams::from_cluster(cluster);
        let owner_ref = OwnerRef::hosted_control_plane(
            &cluster.cluster_name,
            cluster.control_plane_uid.as_deref().unwrap_or_default(),
        );

        let mut config_map = ConfigMap::new(CONFIG_MAP_NAME, &cluster.namespace);
        reconcile_config(&mut config_map, &owner_ref, &params, &version)?;

        let out_dir = PathBuf::from(output_dir);
        fs::create_dir_all(&out_dir)?;

        self.log("Writing config map manifest");
        let manifest_path = out_dir.join(MANIFEST_FILE);
        let manifest = serde_yaml::to_string(&config_map).map_err(|e| {
            ConfigOperationError::Serialization(format!("failed to serialize config map: {}", e))
        })?;
        fs::write(&manifest_path, manifest)?;

        self.log("Writing raw configuration document");
        let document_path = out_dir.join(volumes::KUBE_APISERVER_CONFIG_KEY);
        let document = generate_config(&params, &version);
        let serialized = serde_json::to_string_pretty(&document).map_err(|e| {
            ConfigOperationError::Serialization(format!(
                "failed to serialize kube apiserver config: {}",
                e
            ))
        })?;
        fs::write(&document_path, serialized)?;

        self.log(&format!(
            "Wrote {} and {}",
            manifest_path.display(),
            document_path.display()
        ));
        Ok(vec![manifest_path, document_path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct MockLogger {
        logs: Vec<String>,
    }

    impl MockLogger {
        fn new() -> Self {
            Self { logs: Vec::new() }
        }
    }

    impl Logger for MockLogger {
        fn log(&mut self, message: &str) {
            self.logs.push(message.to_string());
        }

        fn debug_log(&mut self, message: &str) {
            self.logs.push(format!("DEBUG: {}", message));
        }
    }

    #[test]
    fn test_generate_writes_manifest_and_document() -> io::Result<()> {
        let temp_dir = TempDir::new()?;
        let output_dir = temp_dir.path().join("manifests");

        let mut operations = ConfigOperations::new(Box::new(MockLogger::new()));
        let written = operations
            .generate(&ClusterConfig::default(), output_dir.to_str().unwrap())
            .map_err(io::Error::from)?;

        assert_eq!(written.len(), 2);
        assert!(output_dir.join(MANIFEST_FILE).exists());
        assert!(output_dir.join("config.json").exists());

        let document: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output_dir.join("config.json"))?)?;
        assert_eq!(document["kind"], "KubeAPIServerConfig");
        assert!(document["apiServerArguments"]["etcd-servers"][0]
            .as_str()
            .unwrap()
            .contains("2379"));
        Ok(())
    }

    #[test]
    fn test_generate_rejects_bad_version() {
        let temp_dir = TempDir::new().unwrap();
        let mut cluster = ClusterConfig::default();
        cluster.control_plane_version = "not-a-version".to_string();

        let mut operations = ConfigOperations::new(Box::new(MockLogger::new()));
        let result = operations.generate(&cluster, temp_dir.path().to_str().unwrap());
        assert!(matches!(
            result,
            Err(ConfigOperationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_manifest_embeds_config_under_data_key() -> io::Result<()> {
        let temp_dir = TempDir::new()?;
        let mut operations = ConfigOperations::new(Box::new(MockLogger::new()));
        operations
            .generate(&ClusterConfig::default(), temp_dir.path().to_str().unwrap())
            .map_err(io::Error::from)?;

        let manifest = fs::read_to_string(temp_dir.path().join(MANIFEST_FILE))?;
        let parsed: serde_yaml::Value = serde_yaml::from_str(&manifest)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        assert_eq!(parsed["kind"], "ConfigMap");
        assert_eq!(parsed["metadata"]["name"], CONFIG_MAP_NAME);
        assert!(parsed["data"]["config.json"].as_str().is_some());
        Ok(())
    }
}
