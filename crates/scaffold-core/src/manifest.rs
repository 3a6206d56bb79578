//! Manifest (package.json) mutation
//!
//! The generated project's manifest is treated as an ordered key/value tree:
//! mutations are applied by dotted path, untouched keys keep their relative
//! order, and saving goes through a write-then-rename so a crash never
//! leaves a half-written manifest behind.

use crate::config::ResolvedConfig;
use crate::error::ScaffoldError;
use serde_json::{json, Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Keywords written into every scaffolded manifest.
pub const KEYWORDS: &[&str] = &["itk.js"];

/// License written into every scaffolded manifest.
pub const LICENSE: &str = "Apache-2.0";

/// An on-disk manifest loaded into memory. Mutations accumulate until
/// `save` persists the whole document back to the same path.
#[derive(Debug)]
pub struct ManifestFile {
    path: PathBuf,
    root: Value,
}

impl ManifestFile {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ScaffoldError> {
        let path = path.into();
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ScaffoldError::ConfigFileNotFound(path));
            }
            Err(e) => {
                return Err(ScaffoldError::ConfigFileParseError {
                    path,
                    reason: e.to_string(),
                });
            }
        };

        let root: Value =
            serde_json::from_str(&text).map_err(|e| ScaffoldError::ConfigFileParseError {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self { path, root })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Set a value by dotted path (`scripts.start`), creating intermediate
    /// objects as needed. Last write wins; non-object intermediates are
    /// replaced by objects.
    pub fn set(&mut self, dotted_key: &str, value: Value) {
        let mut segments: Vec<&str> = dotted_key.split('.').collect();
        let last = segments.pop().unwrap_or(dotted_key);

        let mut node = &mut self.root;
        for segment in segments {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            node = node
                .as_object_mut()
                .expect("node was just made an object")
                .entry(segment.to_string())
                .or_insert(Value::Null);
        }

        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        node.as_object_mut()
            .expect("node was just made an object")
            .insert(last.to_string(), value);
    }

    /// Look up a value by dotted path.
    pub fn get(&self, dotted_key: &str) -> Option<&Value> {
        let mut node = &self.root;
        for segment in dotted_key.split('.') {
            node = node.as_object()?.get(segment)?;
        }
        Some(node)
    }

    /// Persist the document, atomically with respect to partial writes:
    /// serialize into a temporary file in the same directory, then rename
    /// over the original.
    pub fn save(&self) -> Result<(), ScaffoldError> {
        let write_err = |source: std::io::Error| ScaffoldError::ConfigFileWriteError {
            path: self.path.clone(),
            source,
        };

        let mut body = serde_json::to_string_pretty(&self.root).map_err(|e| {
            ScaffoldError::ConfigFileWriteError {
                path: self.path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            }
        })?;
        body.push('\n');

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(body.as_bytes()).map_err(write_err)?;
        tmp.persist(&self.path)
            .map_err(|e| write_err(e.error))
            .map(|_| ())
    }
}

/// The fixed mutation set applied to every generated manifest: identity
/// fields plus the lifecycle scripts rebound from react-scripts to craco,
/// which is what wires the plugin system into the project's lifecycle.
pub fn apply_scaffold_edits(manifest: &mut ManifestFile, config: &ResolvedConfig) {
    manifest.set("name", json!(config.app_name));
    manifest.set("author", json!(config.author.to_string()));
    manifest.set("description", json!(config.description));
    manifest.set("keywords", json!(KEYWORDS));
    manifest.set("license", json!(LICENSE));
    manifest.set("homepage", json!(config.homepage));
    manifest.set("repository.type", json!("git"));
    manifest.set("repository.url", json!(config.repository_url()));
    manifest.set("scripts.start", json!("craco start"));
    manifest.set("scripts.build", json!("craco build"));
    manifest.set("scripts.test", json!("craco test"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Author;

    const SAMPLE: &str = r#"{
  "name": "placeholder",
  "version": "0.1.0",
  "private": true,
  "dependencies": {
    "react": "^18.0.0",
    "react-dom": "^18.0.0",
    "react-scripts": "5.0.1"
  },
  "scripts": {
    "start": "react-scripts start",
    "build": "react-scripts build",
    "test": "react-scripts test",
    "eject": "react-scripts eject"
  }
}
"#;

    fn sample_config(dest: &Path) -> ResolvedConfig {
        ResolvedConfig {
            destination: dest.to_path_buf(),
            app_name: "demo".into(),
            description: "A demo".into(),
            author: Author::new("Ada Lovelace").with_email("ada@example.org"),
            github_user: "ada".into(),
            repo: "demo".into(),
            homepage: "https://github.com/ada/demo".into(),
        }
    }

    fn write_sample(dir: &Path) -> PathBuf {
        let path = dir.join("package.json");
        std::fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn test_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let err = ManifestFile::load(dir.path().join("package.json")).unwrap_err();
        assert!(matches!(err, ScaffoldError::ConfigFileNotFound(_)));
    }

    #[test]
    fn test_unparseable_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, "not json {").unwrap();
        let err = ManifestFile::load(&path).unwrap_err();
        assert!(matches!(err, ScaffoldError::ConfigFileParseError { .. }));
    }

    #[test]
    fn test_zero_mutation_round_trip_is_byte_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path());

        // First save normalizes formatting; after that the round trip with
        // zero mutations must reproduce the file byte for byte.
        ManifestFile::load(&path).unwrap().save().unwrap();
        let first = std::fs::read(&path).unwrap();
        ManifestFile::load(&path).unwrap().save().unwrap();
        let second = std::fs::read(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_untouched_keys_and_order_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path());

        let mut manifest = ManifestFile::load(&path).unwrap();
        apply_scaffold_edits(&mut manifest, &sample_config(dir.path()));
        manifest.save().unwrap();

        let reloaded = ManifestFile::load(&path).unwrap();
        assert_eq!(reloaded.get("version").unwrap(), "0.1.0");
        assert_eq!(reloaded.get("private").unwrap(), true);
        assert_eq!(reloaded.get("dependencies.react").unwrap(), "^18.0.0");
        assert_eq!(
            reloaded.get("scripts.eject").unwrap(),
            "react-scripts eject"
        );

        // Top-level key order: pre-existing keys keep their positions.
        let text = std::fs::read_to_string(&path).unwrap();
        let name_pos = text.find("\"name\"").unwrap();
        let version_pos = text.find("\"version\"").unwrap();
        let deps_pos = text.find("\"dependencies\"").unwrap();
        assert!(name_pos < version_pos && version_pos < deps_pos);
    }

    #[test]
    fn test_scaffold_edits_rebind_scripts_and_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path());

        let mut manifest = ManifestFile::load(&path).unwrap();
        apply_scaffold_edits(&mut manifest, &sample_config(dir.path()));
        manifest.save().unwrap();

        let m = ManifestFile::load(&path).unwrap();
        assert_eq!(m.get("name").unwrap(), "demo");
        assert_eq!(m.get("author").unwrap(), "Ada Lovelace <ada@example.org>");
        assert_eq!(m.get("license").unwrap(), "Apache-2.0");
        assert_eq!(m.get("keywords").unwrap(), &json!(["itk.js"]));
        assert_eq!(m.get("repository.type").unwrap(), "git");
        assert_eq!(
            m.get("repository.url").unwrap(),
            "git+https://github.com/ada/demo.git"
        );
        assert_eq!(m.get("scripts.start").unwrap(), "craco start");
        assert_eq!(m.get("scripts.build").unwrap(), "craco build");
        assert_eq!(m.get("scripts.test").unwrap(), "craco test");
    }

    #[test]
    fn test_mutations_are_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path());
        let config = sample_config(dir.path());

        let mut manifest = ManifestFile::load(&path).unwrap();
        apply_scaffold_edits(&mut manifest, &config);
        manifest.save().unwrap();
        let once = std::fs::read(&path).unwrap();

        let mut manifest = ManifestFile::load(&path).unwrap();
        apply_scaffold_edits(&mut manifest, &config);
        manifest.save().unwrap();
        let twice = std::fs::read(&path).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_set_replaces_non_object_intermediate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, r#"{"repository": "ada/demo"}"#).unwrap();

        let mut manifest = ManifestFile::load(&path).unwrap();
        manifest.set("repository.type", json!("git"));
        assert_eq!(manifest.get("repository.type").unwrap(), "git");
    }
}
