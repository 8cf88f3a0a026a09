// types.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Just enough of the Kubernetes object model to emit generated manifests.

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRef {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub uid: String,
    pub controller: bool,
}

impl OwnerRef {
    pub fn hosted_control_plane(name: &str, uid: &str) -> Self {
        Self {
            api_version: "hypershift.openshift.io/v1alpha1".to_string(),
            kind: "HostedControlPlane".to_string(),
            name: name.to_string(),
            uid: uid.to_string(),
            controller: true,
        }
    }

    pub fn apply_to(&self, metadata: &mut ObjectMeta) {
        metadata.owner_references = vec![self.clone()];
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub owner_references: Vec<OwnerRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMap {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

impl ConfigMap {
    pub fn new(name: &str, namespace: &str) -> Self {
        Self {
            api_version: "v1".to_string(),
            kind: "ConfigMap".to_string(),
            metadata: ObjectMeta {
                name: name.to_string(),
                namespace: namespace.to_string(),
                owner_references: Vec::new(),
            },
            data: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_ref_apply_replaces_existing() {
        let mut config_map = ConfigMap::new("kas-config", "clusters-example");
        let first = OwnerRef::hosted_control_plane("one", "uid-1");
        let second = OwnerRef::hosted_control_plane("two", "uid-2");
        first.apply_to(&mut config_map.metadata);
        second.apply_to(&mut config_map.metadata);
        assert_eq!(config_map.metadata.owner_references.len(), 1);
        assert_eq!(config_map.metadata.owner_references[0].name, "two");
    }

    #[test]
    fn test_config_map_serializes_with_wire_names() {
        let mut config_map = ConfigMap::new("kas-config", "clusters-example");
        OwnerRef::hosted_control_plane("example", "uid-1").apply_to(&mut config_map.metadata);
        config_map
            .data
            .insert("config.json".to_string(), "{}".to_string());

        let value = serde_json::to_value(&config_map).unwrap();
        assert_eq!(value["apiVersion"], "v1");
        assert_eq!(value["kind"], "ConfigMap");
        assert_eq!(
            value["metadata"]["ownerReferences"][0]["kind"],
            "HostedControlPlane"
        );
        assert_eq!(value["data"]["config.json"], "{}");
    }
}
