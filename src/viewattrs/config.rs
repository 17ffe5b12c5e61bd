use crate::error::{AttrError, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_CLASS_KEY: &str = "class";

/// Options controlling how the merge engine combines attribute maps.
///
/// Can be embedded in a host application's own config file; every field
/// has a default so partial documents deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MergeOptions {
    /// Keys whose values are token sets combined by concatenation
    /// (e.g. "class"). Recognised at every nesting depth.
    #[serde(default = "default_class_like")]
    pub class_like: Vec<String>,
}

fn default_class_like() -> Vec<String> {
    vec![DEFAULT_CLASS_KEY.to_string()]
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            class_like: default_class_like(),
        }
    }
}

impl MergeOptions {
    /// Parse options from a JSON document, filling in defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AttrError::Config(e.to_string()))
    }

    /// Add a class-like key (no-op if already present).
    pub fn class_like(mut self, key: &str) -> Self {
        if !self.is_class_like(key) {
            self.class_like.push(key.to_string());
        }
        self
    }

    pub fn is_class_like(&self, key: &str) -> bool {
        self.class_like.iter().any(|k| k == key)
    }
}
