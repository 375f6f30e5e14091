// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::LedgerError;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Outer weights applied to each sub-score before they are summed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub profitability: f64,
    pub operational: f64,
    pub strategic: f64,
    pub risk: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            profitability: 0.40,
            operational: 0.25,
            strategic: 0.20,
            risk: 0.15,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.profitability + self.operational + self.strategic + self.risk
    }

    pub fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("profitability", self.profitability),
            ("operational", self.operational),
            ("strategic", self.strategic),
            ("risk", self.risk),
        ]
    }

    /// Each weight must be finite and within [0, 1], and together they sum to 1.
    pub fn validate(&self) -> Result<(), LedgerError> {
        for (name, value) in self.named() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(LedgerError::InvalidWeight { name, value });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(LedgerError::InvalidWeights(sum));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Root seed. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Number of trailing daily records scored per route.
    pub scoring_window_days: usize,
    pub weights: ScoreWeights,
    /// Route ids synthesized with the high-profit demand profile.
    pub high_profit_routes: Vec<String>,
    /// Route ids synthesized with the loss-making demand profile.
    pub loss_making_routes: Vec<String>,
    pub recommendation_limit: usize,
    pub alert_limit: usize,
    pub competitive_threat_probability: f64,
}

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            start_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or(NaiveDate::MIN),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(NaiveDate::MIN),
            scoring_window_days: 90,
            weights: ScoreWeights::default(),
            high_profit_routes: ids(&[
                "LON-PAR", "LON-NYC", "PAR-ROM", "MAD-BCN", "FRA-MUC", "AMS-BCN", "DUB-LON",
                "ZUR-VIE", "CPH-OSL", "STO-HEL", "MIA-NYC", "LAX-LAS", "SFO-SEA", "ORD-DEN",
                "ATL-MIA",
            ]),
            loss_making_routes: ids(&[
                "BRS-PRG", "LDS-BUD", "NCL-RIG", "LPL-KRK", "CDF-OSL", "BOD-TLS", "BLQ-CAG",
                "NTE-LYS", "HAJ-DUS", "NUE-STR", "ABZ-INV", "SOU-EXE", "HUY-CVT", "BHD-CAX",
                "PLY-NWI",
            ]),
            recommendation_limit: 20,
            alert_limit: 10,
            competitive_threat_probability: 0.10,
        }
    }
}

impl PipelineConfig {
    /// Checks every invariant the pipeline relies on.
    pub fn validate(&self) -> Result<(), LedgerError> {
        self.weights.validate()?;
        if self.scoring_window_days == 0 {
            return Err(LedgerError::EmptyWindow);
        }
        if self.start_date > self.end_date {
            return Err(LedgerError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        let p = self.competitive_threat_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(LedgerError::InvalidProbability(p));
        }
        Ok(())
    }

    /// Number of calendar days in the synthesis window, both ends included.
    pub fn day_count(&self) -> usize {
        let days = (self.end_date - self.start_date).num_days();
        if days < 0 {
            0
        } else {
            days as usize + 1
        }
    }

    pub fn default_path() -> PathBuf {
        ProjectDirs::from("org", "skyledger", "skyledger")
            .map(|dirs| dirs.config_dir().join("pipeline.json"))
            .unwrap_or_else(|| PathBuf::from("pipeline.json"))
    }

    /// Loads the config at `path`, or the defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.day_count(), 1096);
        assert_eq!(config.high_profit_routes.len(), 15);
        assert_eq!(config.loss_making_routes.len(), 15);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut config = PipelineConfig::default();
        config.weights.risk = 0.25;
        assert!(matches!(
            config.validate(),
            Err(LedgerError::InvalidWeights(sum)) if (sum - 1.10).abs() < 1e-9
        ));
    }

    #[test]
    fn test_rejects_negative_and_nan_weights() {
        let skewed = ScoreWeights {
            profitability: 2.0,
            operational: -0.5,
            strategic: -0.25,
            risk: -0.25,
        };
        assert!((skewed.sum() - 1.0).abs() < 1e-12);
        assert_eq!(
            skewed.validate(),
            Err(LedgerError::InvalidWeight {
                name: "profitability",
                value: 2.0
            })
        );

        let negative = ScoreWeights {
            profitability: 0.6,
            risk: -0.05,
            ..ScoreWeights::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(LedgerError::InvalidWeight { name: "risk", .. })
        ));

        let nan = ScoreWeights {
            profitability: f64::NAN,
            ..ScoreWeights::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(LedgerError::InvalidWeight { name: "profitability", value }) if value.is_nan()
        ));

        let config = PipelineConfig {
            weights: ScoreWeights {
                strategic: f64::INFINITY,
                ..ScoreWeights::default()
            },
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LedgerError::InvalidWeight { name: "strategic", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_window_and_dates() {
        let config = PipelineConfig {
            scoring_window_days: 0,
            ..PipelineConfig::default()
        };
        assert_eq!(config.validate(), Err(LedgerError::EmptyWindow));

        let config = PipelineConfig {
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LedgerError::InvalidDateRange { .. })
        ));
        assert_eq!(config.day_count(), 0);

        let config = PipelineConfig {
            competitive_threat_probability: 1.5,
            ..PipelineConfig::default()
        };
        assert_eq!(config.validate(), Err(LedgerError::InvalidProbability(1.5)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pipeline.json");

        let config = PipelineConfig {
            seed: Some(1234),
            alert_limit: 3,
            ..PipelineConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = PipelineConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        fs::write(&path, r#"{ "seed": 5, "scoring_window_days": 30 }"#).unwrap();

        let loaded = PipelineConfig::load(&path).unwrap();
        assert_eq!(loaded.seed, Some(5));
        assert_eq!(loaded.scoring_window_days, 30);
        assert_eq!(loaded.weights, ScoreWeights::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = PipelineConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, PipelineConfig::default());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        fs::write(
            &path,
            r#"{ "weights": { "profitability": 0.5, "operational": 0.5, "strategic": 0.5, "risk": 0.5 } }"#,
        )
        .unwrap();
        assert!(PipelineConfig::load(&path).is_err());
    }
}
