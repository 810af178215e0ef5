//! package.json document model
//!
//! Wraps the parsed JSON object so that key order and unknown fields survive
//! a rewrite. Handles:
//! - dependencies
//! - devDependencies
//! - scripts

use crate::domain::{Dependency, DependencyType};
use crate::error::ManifestError;
use serde_json::{Map, Value};
use std::path::Path;

const SCRIPTS_KEY: &str = "scripts";

/// An in-memory package.json document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackageJson {
    document: Map<String, Value>,
}

impl PackageJson {
    /// Parse manifest content; `path` is only used for error messages
    pub fn parse(path: &Path, content: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::json_parse_error(path, e.to_string()))?;
        match value {
            Value::Object(document) => Ok(Self { document }),
            other => Err(ManifestError::InvalidDocument {
                path: path.to_path_buf(),
                message: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    /// Declared dependencies in merged declaration order
    ///
    /// Every `dependencies` entry comes first; a name also listed under
    /// `devDependencies` takes the dev range and type. Dev-only entries follow.
    pub fn declared_dependencies(&self) -> Vec<Dependency> {
        let production = self.string_entries(DependencyType::Production.manifest_key());
        let development = self.string_entries(DependencyType::Development.manifest_key());

        let mut merged = Vec::with_capacity(production.len() + development.len());
        for (name, range) in &production {
            match development.iter().find(|(dev_name, _)| dev_name == name) {
                Some((_, dev_range)) => merged.push(Dependency::development(name, dev_range)),
                None => merged.push(Dependency::production(name, range)),
            }
        }
        for (name, range) in &development {
            if !production.iter().any(|(prod_name, _)| prod_name == name) {
                merged.push(Dependency::development(name, range));
            }
        }
        merged
    }

    /// Dependencies declared in a single map, in order
    pub fn dependencies(&self, dep_type: DependencyType) -> Vec<Dependency> {
        self.string_entries(dep_type.manifest_key())
            .into_iter()
            .map(|(name, range)| Dependency::new(name, range, dep_type))
            .collect()
    }

    /// Declared range for `name` in the given map
    pub fn dependency_range(&self, dep_type: DependencyType, name: &str) -> Option<&str> {
        self.document
            .get(dep_type.manifest_key())?
            .as_object()?
            .get(name)?
            .as_str()
    }

    /// Insert or overwrite a dependency range, creating the map if needed
    pub fn set_dependency(&mut self, dep_type: DependencyType, name: &str, range: &str) {
        if let Some(map) = self.object_mut(dep_type.manifest_key()) {
            map.insert(name.to_string(), Value::String(range.to_string()));
        }
    }

    /// Rename a dependency key keeping its value and position
    ///
    /// When `to` is already declared, `from` is dropped and the value moves to
    /// the existing `to` entry. Returns false if `from` is not declared.
    pub fn rename_dependency(&mut self, dep_type: DependencyType, from: &str, to: &str) -> bool {
        let key = dep_type.manifest_key();
        match self.document.get_mut(key).and_then(Value::as_object_mut) {
            Some(map) => rename_key(map, from, to),
            None => false,
        }
    }

    /// Scripts as (name, command) pairs in declaration order
    pub fn scripts(&self) -> Vec<(String, String)> {
        self.string_entries(SCRIPTS_KEY)
    }

    /// Command for a named script
    pub fn script(&self, name: &str) -> Option<&str> {
        self.document.get(SCRIPTS_KEY)?.as_object()?.get(name)?.as_str()
    }

    /// Insert or overwrite a script
    pub fn set_script(&mut self, name: &str, command: &str) {
        if let Some(map) = self.object_mut(SCRIPTS_KEY) {
            map.insert(name.to_string(), Value::String(command.to_string()));
        }
    }

    /// Remove a script; returns false if it was not declared
    pub fn remove_script(&mut self, name: &str) -> bool {
        self.document
            .get_mut(SCRIPTS_KEY)
            .and_then(Value::as_object_mut)
            .and_then(|map| map.shift_remove(name))
            .is_some()
    }

    /// Rename a script in place; returns false if it was not declared
    pub fn rename_script(&mut self, from: &str, to: &str) -> bool {
        match self
            .document
            .get_mut(SCRIPTS_KEY)
            .and_then(Value::as_object_mut)
        {
            Some(map) => rename_key(map, from, to),
            None => false,
        }
    }

    /// Drop `dependencies`/`devDependencies` maps that ended up empty
    pub fn prune_empty_dependency_maps(&mut self) {
        for dep_type in DependencyType::all() {
            let key = dep_type.manifest_key();
            let empty = matches!(self.document.get(key), Some(Value::Object(map)) if map.is_empty());
            if empty {
                self.document.shift_remove(key);
            }
        }
    }

    /// Pretty-printed JSON (2-space indent) with a trailing newline
    pub fn to_pretty_string(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string_pretty(&self.document)?;
        out.push('\n');
        Ok(out)
    }

    /// Read-only view of the underlying document
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.document
    }

    fn string_entries(&self, key: &str) -> Vec<(String, String)> {
        self.document
            .get(key)
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .filter_map(|(name, value)| {
                        value.as_str().map(|v| (name.clone(), v.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Object stored under `key`, replacing a missing or non-object value
    fn object_mut(&mut self, key: &str) -> Option<&mut Map<String, Value>> {
        let entry = self
            .document
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        entry.as_object_mut()
    }
}

/// Rebuild `map` with `from` renamed to `to` at the same position
fn rename_key(map: &mut Map<String, Value>, from: &str, to: &str) -> bool {
    if !map.contains_key(from) {
        return false;
    }
    if from == to {
        return true;
    }

    if map.contains_key(to) {
        if let Some(value) = map.shift_remove(from) {
            map.insert(to.to_string(), value);
        }
        return true;
    }

    let entries = std::mem::take(map);
    for (key, value) in entries {
        if key == from {
            map.insert(to.to_string(), value);
        } else {
            map.insert(key, value);
        }
    }
    true
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(content: &str) -> PackageJson {
        PackageJson::parse(&PathBuf::from("package.json"), content).unwrap()
    }

    const SAMPLE: &str = r#"{
  "name": "demo",
  "version": "1.0.0",
  "scripts": {
    "build": "tsc",
    "test": "jest"
  },
  "dependencies": {
    "react": "^18.2.0",
    "lodash": "~4.17.21",
    "typescript": "^4.0.0"
  },
  "devDependencies": {
    "jest": "^29.0.0",
    "typescript": "^5.3.0"
  }
}"#;

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = PackageJson::parse(&PathBuf::from("package.json"), "{ invalid").unwrap_err();
        assert!(matches!(err, ManifestError::JsonParseError { .. }));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = PackageJson::parse(&PathBuf::from("package.json"), "[1, 2]").unwrap_err();
        assert!(matches!(err, ManifestError::InvalidDocument { .. }));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_declared_dependencies_merged_order() {
        let manifest = parse(SAMPLE);
        let deps = manifest.declared_dependencies();
        let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["react", "lodash", "typescript", "jest"]);
    }

    #[test]
    fn test_dev_takes_precedence() {
        let manifest = parse(SAMPLE);
        let deps = manifest.declared_dependencies();
        let typescript = deps.iter().find(|d| d.name == "typescript").unwrap();
        assert_eq!(typescript.declared_range(), "^5.3.0");
        assert_eq!(typescript.dep_type, DependencyType::Development);
        assert_eq!(deps.len(), 4);
    }

    #[test]
    fn test_non_string_values_ignored() {
        let manifest = parse(r#"{"dependencies": {"a": "1.0.0", "b": 3, "c": null}}"#);
        let deps = manifest.declared_dependencies();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name, "a");
    }

    #[test]
    fn test_missing_maps() {
        let manifest = parse(r#"{"name": "empty"}"#);
        assert!(manifest.declared_dependencies().is_empty());
        assert!(manifest.scripts().is_empty());
    }

    #[test]
    fn test_dependencies_single_map() {
        let manifest = parse(SAMPLE);
        let dev = manifest.dependencies(DependencyType::Development);
        assert_eq!(dev.len(), 2);
        assert!(dev.iter().all(|d| d.is_dev()));
    }

    #[test]
    fn test_set_dependency() {
        let mut manifest = parse(SAMPLE);
        manifest.set_dependency(DependencyType::Production, "react", "^18.3.1");
        assert_eq!(
            manifest.dependency_range(DependencyType::Production, "react"),
            Some("^18.3.1")
        );
        let names: Vec<String> = manifest
            .dependencies(DependencyType::Production)
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["react", "lodash", "typescript"]);
    }

    #[test]
    fn test_rename_dependency_keeps_position() {
        let mut manifest = parse(r#"{"dependencies": {"a": "1.0.0", "reactt": "^18.0.0", "z": "2.0.0"}}"#);
        assert!(manifest.rename_dependency(DependencyType::Production, "reactt", "react"));
        let deps = manifest.dependencies(DependencyType::Production);
        let names: Vec<&str> = deps.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a", "react", "z"]);
        assert_eq!(deps[1].declared_range(), "^18.0.0");
    }

    #[test]
    fn test_rename_dependency_onto_existing_key() {
        let mut manifest = parse(r#"{"dependencies": {"react": "^17.0.0", "reactt": "^18.0.0"}}"#);
        assert!(manifest.rename_dependency(DependencyType::Production, "reactt", "react"));
        let deps = manifest.dependencies(DependencyType::Production);
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].declared_range(), "^18.0.0");
    }

    #[test]
    fn test_rename_dependency_missing() {
        let mut manifest = parse(SAMPLE);
        assert!(!manifest.rename_dependency(DependencyType::Production, "nope", "x"));
        assert!(!manifest.rename_dependency(DependencyType::Development, "react", "x"));
    }

    #[test]
    fn test_scripts() {
        let mut manifest = parse(SAMPLE);
        assert_eq!(
            manifest.scripts(),
            vec![
                ("build".to_string(), "tsc".to_string()),
                ("test".to_string(), "jest".to_string())
            ]
        );

        manifest.set_script("lint", "eslint .");
        assert_eq!(manifest.script("lint"), Some("eslint ."));

        assert!(manifest.remove_script("build"));
        assert!(!manifest.remove_script("build"));

        assert!(manifest.rename_script("test", "unit"));
        let names: Vec<String> = manifest.scripts().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["unit", "lint"]);
    }

    #[test]
    fn test_set_script_creates_map() {
        let mut manifest = parse(r#"{"name": "x"}"#);
        manifest.set_script("start", "node index.js");
        assert_eq!(manifest.script("start"), Some("node index.js"));
    }

    #[test]
    fn test_prune_empty_dependency_maps() {
        let mut manifest = parse(r#"{"dependencies": {}, "devDependencies": {"a": "1.0.0"}, "scripts": {}}"#);
        manifest.prune_empty_dependency_maps();
        assert!(!manifest.as_map().contains_key("dependencies"));
        assert!(manifest.as_map().contains_key("devDependencies"));
        assert!(manifest.as_map().contains_key("scripts"));
    }

    #[test]
    fn test_to_pretty_string_preserves_order() {
        let manifest = parse(r#"{"name":"demo","version":"1.0.0","private":true,"dependencies":{"b":"1.0.0","a":"2.0.0"}}"#);
        let out = manifest.to_pretty_string().unwrap();
        assert_eq!(
            out,
            "{\n  \"name\": \"demo\",\n  \"version\": \"1.0.0\",\n  \"private\": true,\n  \"dependencies\": {\n    \"b\": \"1.0.0\",\n    \"a\": \"2.0.0\"\n  }\n}\n"
        );
    }
}
