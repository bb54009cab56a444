//! Draw event configuration
//!
//! Loaded from a TOML file. A missing file yields [`DrawConfig::default`], which
//! carries the catalog of the reference event.

use crate::types::PrizeTier;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration load and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Top-level event configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Prize catalog in display order, placeholder tier included
    pub prizes: Vec<PrizeTier>,
    /// How many winners a single draw round picks, per tier position
    pub each_count: Vec<u32>,
    /// Event or company label shown on cards
    pub company: String,
    /// Session persistence settings
    pub session: SessionConfig,
}

/// Persistence settings for a draw session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory holding the persisted records
    pub data_dir: PathBuf,
    /// Upper bound on a single record read or write
    pub persist_timeout_ms: u64,
    /// Record names
    pub records: RecordNames,
}

/// Names of the persisted records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordNames {
    /// Winners-by-prize record
    pub winners: String,
    /// Absentee record
    pub absentees: String,
    /// Roster source rows
    pub roster: String,
    /// Export artifact
    pub results: String,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            prizes: vec![
                PrizeTier::new(0, 0, "Special Prize"),
                PrizeTier::new(1, 1, "First Prize")
                    .with_title("Mystery Gift")
                    .with_image("../img/secrit.jpg"),
                PrizeTier::new(2, 2, "Second Prize")
                    .with_title("Mac Pro")
                    .with_image("../img/mbp.jpg"),
                PrizeTier::new(3, 3, "Third Prize")
                    .with_title("Insulated Cup")
                    .with_image("../img/huawei.png"),
            ],
            each_count: vec![1, 1, 5, 6, 7, 8, 9, 10],
            company: String::new(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            persist_timeout_ms: 5_000,
            records: RecordNames::default(),
        }
    }
}

impl Default for RecordNames {
    fn default() -> Self {
        Self {
            winners: "winners".to_string(),
            absentees: "absentees".to_string(),
            roster: "roster".to_string(),
            results: "results".to_string(),
        }
    }
}

impl SessionConfig {
    /// Persistence timeout as a duration
    pub fn persist_timeout(&self) -> Duration {
        Duration::from_millis(self.persist_timeout_ms)
    }
}

impl DrawConfig {
    /// Load configuration from `path`, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text without validating it
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check catalog and session invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for tier in &self.prizes {
            if !seen.insert(tier.prize_type) {
                return Err(ConfigError::invalid(
                    "prizes",
                    format!("prize type {} is declared twice", tier.prize_type),
                ));
            }
            if tier.text.trim().is_empty() {
                return Err(ConfigError::invalid(
                    "prizes",
                    format!("prize type {} has no display text", tier.prize_type),
                ));
            }
        }
        if !self.prizes.iter().any(|tier| tier.prize_type.is_placeholder()) {
            return Err(ConfigError::invalid(
                "prizes",
                "the placeholder tier (type 0) must be present",
            ));
        }
        if self.session.persist_timeout_ms == 0 {
            return Err(ConfigError::invalid(
                "session.persist_timeout_ms",
                "must be greater than zero",
            ));
        }
        let records = &self.session.records;
        let names = [
            &records.winners,
            &records.absentees,
            &records.roster,
            &records.results,
        ];
        if names.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "session.records",
                "record names cannot be empty",
            ));
        }
        if names.iter().collect::<HashSet<_>>().len() != names.len() {
            return Err(ConfigError::invalid(
                "session.records",
                "record names must be distinct",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrizeType;
    use assert_matches::assert_matches;

    #[test]
    fn default_config_is_valid() {
        let config = DrawConfig::default();
        config.validate().unwrap();
        assert_eq!(config.prizes[0].prize_type, PrizeType::PLACEHOLDER);
        assert_eq!(config.each_count, [1, 1, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn parses_toml_catalog() {
        let config = DrawConfig::from_toml(
            r#"
            company = "Acme"
            each_count = [1, 2]

            [session]
            data_dir = "/tmp/draw"
            persist_timeout_ms = 250

            [[prizes]]
            type = 0
            count = 0
            text = "Special"

            [[prizes]]
            type = 1
            count = 1
            text = "First"
            title = "Laptop"
            img = "laptop.png"
            "#,
        )
        .unwrap();

        config.validate().unwrap();
        assert_eq!(config.company, "Acme");
        assert_eq!(config.prizes.len(), 2);
        assert_eq!(config.prizes[1].image, "laptop.png");
        assert_eq!(config.session.persist_timeout(), Duration::from_millis(250));
        assert_eq!(config.session.records, RecordNames::default());
    }

    #[test]
    fn sample_config_parses() {
        let config = DrawConfig::from_toml(include_str!("../../../draw.toml")).unwrap();
        config.validate().unwrap();
        assert_eq!(config.prizes, DrawConfig::default().prizes);
        assert_eq!(config.company, "Acme Annual Party");
    }

    #[test]
    fn rejects_duplicate_prize_types() {
        let mut config = DrawConfig::default();
        config.prizes.push(PrizeTier::new(1, 4, "Another First"));
        assert_matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "prizes");
    }

    #[test]
    fn rejects_missing_placeholder() {
        let mut config = DrawConfig::default();
        config.prizes.remove(0);
        assert_matches!(config.validate(), Err(ConfigError::Invalid { .. }));
    }

    #[test]
    fn rejects_clashing_record_names() {
        let mut config = DrawConfig::default();
        config.session.records.absentees = config.session.records.winners.clone();
        assert_matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "session.records");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DrawConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, DrawConfig::default());
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draw.toml");
        std::fs::write(&path, "prizes = 3").unwrap();
        assert_matches!(DrawConfig::load(&path), Err(ConfigError::Parse { .. }));
    }
}
