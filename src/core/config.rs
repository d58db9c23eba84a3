//! RON data file loading shared by every config resource.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a data file.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },
}

/// Read and parse a RON file.
pub fn load_ron<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, DataLoadError> {
    let path = path.as_ref();
    let display = path.display().to_string();

    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    parse_ron(&display, &contents)
}

/// Parse RON text, tagging errors with the source name.
pub fn parse_ron<T: DeserializeOwned>(source: &str, contents: &str) -> Result<T, DataLoadError> {
    ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
        path: source.to_string(),
        details: e.to_string(),
    })
}

/// Load a RON file, falling back to `T::default()` and logging why.
pub fn load_or_default<T: DeserializeOwned + Default>(path: &str) -> T {
    match load_ron(path) {
        Ok(config) => {
            info!("Loaded {}", path);
            config
        }
        Err(e @ DataLoadError::FileNotFound(_)) => {
            warn!("{}. Using defaults.", e);
            T::default()
        }
        Err(e) => {
            error!("{}. Using defaults.", e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Default, PartialEq)]
    struct Sample {
        speed: f32,
        #[serde(default)]
        label: String,
    }

    #[test]
    fn parses_valid_ron() {
        let sample: Sample = parse_ron("inline", "(speed: 2.5)").unwrap();
        assert_eq!(sample.speed, 2.5);
        assert!(sample.label.is_empty());
    }

    #[test]
    fn parse_error_carries_source_name() {
        let err = parse_ron::<Sample>("broken.ron", "(speed: )").unwrap_err();
        match err {
            DataLoadError::ParseError { path, .. } => assert_eq!(path, "broken.ron"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_ron::<Sample>("does/not/exist.ron").unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound(_)));
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let sample: Sample = load_or_default("does/not/exist.ron");
        assert_eq!(sample, Sample::default());
    }
}
