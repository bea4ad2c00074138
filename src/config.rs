use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::data::{CsvOptions, DEFAULT_PREVIEW_ROWS};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "datasets.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Declarative dataset table
// ---------------------------------------------------------------------------

/// One logical dataset: where its file lives and which columns to prune.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DatasetSpec {
    pub name: String,
    /// File name relative to the base directory; `<name>.csv` when absent.
    #[serde(default)]
    pub file: Option<String>,
    /// Columns removed from the loaded table.
    #[serde(default)]
    pub drop: Vec<String>,
    /// When set, only these columns are kept, in this order.
    #[serde(default)]
    pub keep: Option<Vec<String>>,
}

impl DatasetSpec {
    /// A spec that drops `columns` from `<name>.csv`.
    pub fn dropping(name: &str, columns: &[&str]) -> Self {
        DatasetSpec {
            name: name.to_string(),
            file: None,
            drop: columns.iter().map(|c| c.to_string()).collect(),
            keep: None,
        }
    }

    /// Resolve the dataset's file against `base_dir`.
    pub fn path(&self, base_dir: &Path) -> PathBuf {
        match &self.file {
            Some(file) => base_dir.join(file),
            None => crate::data::dataset_path(base_dir, &self.name),
        }
    }
}

/// An independently runnable list of datasets.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct JobSpec {
    pub name: String,
    #[serde(default = "JobSpec::default_enabled")]
    pub enabled: bool,
    pub datasets: Vec<DatasetSpec>,
}

impl JobSpec {
    fn default_enabled() -> bool {
        true
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "Config::default_base_dir")]
    pub base_dir: PathBuf,
    #[serde(default = "Config::default_preview_rows")]
    pub preview_rows: usize,
    #[serde(default = "Config::default_delimiter")]
    pub delimiter: String,
    pub jobs: Vec<JobSpec>,
}

impl Config {
    fn default_base_dir() -> PathBuf {
        PathBuf::from("data")
    }

    fn default_preview_rows() -> usize {
        DEFAULT_PREVIEW_ROWS
    }

    fn default_delimiter() -> String {
        String::from(",")
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Config, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. A relative `base_dir` is resolved against the
    /// directory containing the file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Config::from_json(&text)?;
        if config.base_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.base_dir = parent.join(&config.base_dir);
            }
        }
        debug!(
            "Loaded config {} (base_dir = {})",
            path.display(),
            config.base_dir.display()
        );
        Ok(config)
    }

    pub fn csv_options(&self) -> CsvOptions {
        CsvOptions {
            delimiter: self.delimiter.as_bytes().first().copied().unwrap_or(b','),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jobs.is_empty() {
            return Err(ConfigError::Invalid("no jobs configured".into()));
        }
        if self.preview_rows == 0 {
            return Err(ConfigError::Invalid("preview_rows must be at least 1".into()));
        }
        if self.delimiter.len() != 1 || !self.delimiter.is_ascii() {
            return Err(ConfigError::Invalid(format!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            )));
        }

        let mut job_names = HashSet::new();
        for job in &self.jobs {
            if job.name.trim().is_empty() {
                return Err(ConfigError::Invalid("job with empty name".into()));
            }
            if !job_names.insert(job.name.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate job '{}'", job.name)));
            }
            for dataset in &job.datasets {
                if dataset.name.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "job '{}' has a dataset with empty name",
                        job.name
                    )));
                }
                if dataset.keep.is_some() && !dataset.drop.is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "dataset '{}' in job '{}' sets both keep and drop",
                        dataset.name, job.name
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"
    {
        "jobs": [
            { "name": "players", "datasets": [ { "name": "Batting", "drop": ["stint"] } ] }
        ]
    }
    "#;

    #[test]
    fn load_minimal_json_with_defaults() {
        let conf = Config::from_json(MINIMAL).unwrap();
        assert_eq!(
            conf,
            Config {
                base_dir: PathBuf::from("data"),
                preview_rows: 5,
                delimiter: String::from(","),
                jobs: vec![JobSpec {
                    name: String::from("players"),
                    enabled: true,
                    datasets: vec![DatasetSpec::dropping("Batting", &["stint"])],
                }],
            }
        );
        assert_eq!(conf.csv_options(), CsvOptions { delimiter: b',' });
    }

    #[test]
    fn dataset_path_defaults_to_name() {
        let base = Path::new("/data");
        let batting = DatasetSpec::dropping("Batting", &[]);
        assert_eq!(batting.path(base), PathBuf::from("/data/Batting.csv"));

        let stats = DatasetSpec {
            file: Some("player_stats.csv".into()),
            ..DatasetSpec::dropping("stats", &[])
        };
        assert_eq!(stats.path(base), PathBuf::from("/data/player_stats.csv"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let json = r#"{ "jobs": [], "base_dir": "x", "colour": "red" }"#;
        assert!(matches!(Config::from_json(json), Err(ConfigError::Json(_))));
    }

    #[rstest]
    #[case::no_jobs(r#"{ "jobs": [] }"#)]
    #[case::zero_preview(
        r#"{ "preview_rows": 0, "jobs": [ { "name": "a", "datasets": [] } ] }"#
    )]
    #[case::long_delimiter(
        r#"{ "delimiter": ";;", "jobs": [ { "name": "a", "datasets": [] } ] }"#
    )]
    #[case::duplicate_job(
        r#"{ "jobs": [ { "name": "a", "datasets": [] }, { "name": "a", "datasets": [] } ] }"#
    )]
    #[case::empty_dataset_name(
        r#"{ "jobs": [ { "name": "a", "datasets": [ { "name": " " } ] } ] }"#
    )]
    #[case::keep_and_drop(
        r#"{ "jobs": [ { "name": "a", "datasets": [ { "name": "Fielding", "keep": ["POS"], "drop": ["G"] } ] } ] }"#
    )]
    fn rejects_invalid_config(#[case] json: &str) {
        assert!(matches!(Config::from_json(json), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn relative_base_dir_follows_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("datasets.json");
        std::fs::write(&path, MINIMAL).unwrap();

        let conf = Config::load(&path).unwrap();
        assert_eq!(conf.base_dir, dir.path().join("data"));
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
