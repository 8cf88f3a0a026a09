// src/kas/args.rs
use serde::Serialize;
use std::collections::BTreeMap;

// Command-line arguments for the kube-apiserver process, keyed by flag name
// without the leading dashes. The serialized form is sorted by flag name.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct KubeApiServerArgs(BTreeMap<String, Vec<String>>);

impl KubeApiServerArgs {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    // Replaces any previous values for the flag.
    pub fn set(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), vec![value.to_string()]);
    }

    pub fn set_list<S: AsRef<str>>(&mut self, name: &str, values: &[S]) {
        self.0.insert(
            name.to_string(),
            values.iter().map(|v| v.as_ref().to_string()).collect(),
        );
    }

    pub fn get(&self, name: &str) -> Option<&Vec<String>> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }
}
