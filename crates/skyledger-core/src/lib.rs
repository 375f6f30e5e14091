// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! SkyLedger - route profitability synthesis and scoring
//!
//! Expands a static route catalog into three years of daily per-flight
//! performance records, scores the most recent window of each route and
//! buckets it into a BCG-style quadrant.
//!
//! # Pipeline
//!
//! 1. [`catalog`]: the 50-route network
//! 2. [`synth`]: daily performance records per route
//! 3. [`scoring`]: four weighted sub-scores and a total
//! 4. [`classify`]: Stars / Cash Cows / Question Marks / Dogs plus trend
//! 5. [`advisory`]: recommendations and alerts
//!
//! [`ranking`], [`forecast`] and [`report`] sit on top of the pipeline,
//! and [`portfolio::Portfolio`] caches every stage for a session.
//!
//! # Quick Start
//!
//! ```no_run
//! use skyledger_core::{Catalog, PipelineConfig, Portfolio};
//!
//! let config = PipelineConfig { seed: Some(7), ..PipelineConfig::default() };
//! let portfolio = Portfolio::new(Catalog::builtin().clone(), config).unwrap();
//!
//! for score in portfolio.scores() {
//!     println!("{} {:.1} {}", score.route_id, score.total_score, score.classification);
//! }
//! ```
//!
//! | Total score | Classification |
//! |-------------|----------------|
//! | 80-100 | Stars |
//! | 65-79 | Cash Cows |
//! | 45-64 | Question Marks |
//! | 0-44 | Dogs |

pub mod advisory;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod forecast;
pub mod portfolio;
pub mod ranking;
pub mod report;
pub mod rng;
pub mod scoring;
pub mod synth;

pub use advisory::{generate_alerts, generate_recommendations, Alert, Recommendation};
pub use catalog::{Catalog, RouteMaster};
pub use classify::{Classification, Trend};
pub use config::{PipelineConfig, ScoreWeights};
pub use portfolio::Portfolio;
pub use scoring::{score_routes, RouteScore};
pub use synth::{generate_performance, RoutePerformance};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Score weights must sum to 1.0 (got {0:.6})")]
    InvalidWeights(f64),
    #[error("Score weight '{name}' must be within [0, 1] (got {value})")]
    InvalidWeight { name: &'static str, value: f64 },
    #[error("Scoring window must cover at least one day")]
    EmptyWindow,
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
    #[error("Probability out of range [0, 1]: {0}")]
    InvalidProbability(f64),
    #[error("Unknown route: {0}")]
    UnknownRoute(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_exports() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 50);
        let _ = Classification::Stars;
        let _ = Trend::Stable;
        let _ = PipelineConfig::default();
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LedgerError::UnknownRoute("XXX-YYY".to_string()).to_string(),
            "Unknown route: XXX-YYY"
        );
        assert!(LedgerError::InvalidWeights(0.9)
            .to_string()
            .contains("0.900000"));
    }
}
