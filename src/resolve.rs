//! Display names for label and tenant identifiers.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Name table loaded from JSON:
///
/// ```json
/// { "labels": { "<label id>": "Confidential" }, "tenants": { "<tenant id>": "Contoso" } }
/// ```
///
/// Identifiers are compared without braces and ignoring case.
#[derive(Debug, Default, Deserialize)]
pub struct NameTable {
    #[serde(default)]
    labels: HashMap<String, String>,
    #[serde(default)]
    tenants: HashMap<String, String>,
}

impl NameTable {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("failed to read name table {}", path.display()))?;
        let table: NameTable = serde_json::from_slice(&data)
            .with_context(|| format!("failed to parse name table {}", path.display()))?;
        Ok(table.normalized())
    }

    fn normalized(self) -> Self {
        let normalize = |map: HashMap<String, String>| -> HashMap<String, String> {
            map.into_iter()
                .map(|(id, name)| (normalize_id(&id), name))
                .collect()
        };
        Self {
            labels: normalize(self.labels),
            tenants: normalize(self.tenants),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len() + self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn label_name(&self, id: &str) -> Option<&str> {
        self.labels.get(&normalize_id(id)).map(String::as_str)
    }

    pub fn tenant_name(&self, id: &str) -> Option<&str> {
        self.tenants.get(&normalize_id(id)).map(String::as_str)
    }
}

fn normalize_id(id: &str) -> String {
    id.trim_matches(|c| c == '{' || c == '}').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_and_matches_loosely() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.json");
        std::fs::write(
            &path,
            r#"{"labels": {"{ABC-1}": "Confidential"}, "tenants": {"t-1": "Contoso"}}"#,
        )
        .unwrap();

        let table = NameTable::load(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.label_name("abc-1"), Some("Confidential"));
        assert_eq!(table.tenant_name("{T-1}"), Some("Contoso"));
        assert_eq!(table.label_name("t-1"), None);
    }

    #[test]
    fn sections_are_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.json");
        std::fs::write(&path, r#"{"tenants": {}}"#).unwrap();
        assert!(NameTable::load(&path).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.json");
        std::fs::write(&path, "labels = 1").unwrap();
        assert!(NameTable::load(&path).is_err());
        assert!(NameTable::load(&dir.path().join("missing.json")).is_err());
    }
}
