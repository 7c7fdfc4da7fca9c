//! Serialization module for persisting mapped collections as JSON or YAML.
//!
//! The value is always serialized in memory first, so a value that cannot be
//! represented never leaves a file behind.

use crate::error::Result;
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Output formats supported by [`save_as`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

/// Serializes a value to pretty-printed JSON.
pub fn serialize_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    debug!("Serializing to JSON");
    Ok(serde_json::to_string_pretty(value)?)
}

/// Serializes a value to YAML.
pub fn serialize_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    debug!("Serializing to YAML");
    Ok(serde_yaml::to_string(value)?)
}

/// Saves a collection as pretty-printed JSON, overwriting `path`.
///
/// # Errors
///
/// Returns a serialization error if the value cannot be represented in
/// JSON, and an IO error if the file cannot be written.
pub fn save<T: Serialize + ?Sized>(collection: &T, path: &Path) -> Result<()> {
    save_as(collection, path, Format::Json)
}

/// Saves a collection in the given format, overwriting `path`.
pub fn save_as<T: Serialize + ?Sized>(collection: &T, path: &Path, format: Format) -> Result<()> {
    let content = match format {
        Format::Json => serialize_json(collection)?,
        Format::Yaml => serialize_yaml(collection)?,
    };
    write_to_file(&content, path)
}

/// Writes string content to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
/// Missing parent directories are created.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(path, content)?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::schema::{Api, Route};
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn create_test_apis() -> Vec<Api> {
        vec![Api {
            controller: "list_users".to_string(),
            routes: vec![Route {
                method: "GET".to_string(),
                route: "/users".to_string(),
            }],
            response: vec![200],
            ..Api::default()
        }]
    }

    /// A value serde refuses to serialize, like a handle or channel would be.
    struct Unrepresentable;

    impl Serialize for Unrepresentable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot serialize a handle"))
        }
    }

    #[test]
    fn test_save_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("api.json");

        save(&create_test_apis(), &file_path).unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed[0]["controller"], "list_users");
        assert_eq!(parsed[0]["routes"][0]["route"], "/users");
        assert_eq!(parsed[0]["response"][0], 200);
        assert!(parsed[0].get("authorization").is_none());
        assert!(parsed[0].get("validate").is_none());
    }

    #[test]
    fn test_save_yaml_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("api.yaml");
        let apis = create_test_apis();

        save_as(&apis, &file_path, Format::Yaml).unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert!(content.contains("controller: list_users"));
        let deserialized: Vec<Api> = serde_yaml::from_str(&content).unwrap();
        assert_eq!(deserialized, apis);
    }

    #[test]
    fn test_save_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("api.json");
        fs::write(&file_path, "previous content that is much longer than an empty array").unwrap();

        let empty: Vec<Api> = Vec::new();
        save(&empty, &file_path).unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "[]");
    }

    #[test]
    fn test_save_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("out").join("nested").join("api.json");

        save(&create_test_apis(), &file_path).unwrap();

        assert!(file_path.exists());
    }

    #[test]
    fn test_save_wrong_data() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("api.json");
        let mut data = HashMap::new();
        data.insert("foo", Unrepresentable);

        let err = save(&data, &file_path).unwrap_err();

        assert!(matches!(err, Error::SerializationError(_)));
        assert!(!file_path.exists());
    }

    #[test]
    fn test_save_rejects_non_string_map_keys() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("api.json");
        let mut data = HashMap::new();
        data.insert(vec![1u8, 2], "value");

        let err = save(&data, &file_path).unwrap_err();

        assert!(matches!(err, Error::SerializationError(_)));
        assert!(!file_path.exists());
    }

    #[test]
    fn test_save_unwritable_path() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let err = save(&create_test_apis(), &blocker.join("api.json")).unwrap_err();

        assert!(matches!(err, Error::IoError(_)));
    }
}
