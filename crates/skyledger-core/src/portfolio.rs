// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! A scored route network held for one session.
//!
//! Every stage is computed on first access and cached. `invalidate` and
//! `reseed` drop the caches so the next access recomputes.

use crate::advisory::{generate_alerts, generate_recommendations, Alert, Recommendation};
use crate::catalog::Catalog;
use crate::config::PipelineConfig;
use crate::forecast::{forecast_route, RouteForecast};
use crate::ranking::{rank_routes, InsightsSummary, RankingQuery};
use crate::rng::SeedSource;
use crate::scoring::{score_routes, RouteScore};
use crate::synth::{generate_performance, RoutePerformance};
use crate::LedgerError;
use std::sync::OnceLock;

#[derive(Debug)]
pub struct Portfolio {
    catalog: Catalog,
    config: PipelineConfig,
    seeds: SeedSource,
    performance: OnceLock<Vec<RoutePerformance>>,
    scores: OnceLock<Vec<RouteScore>>,
    recommendations: OnceLock<Vec<Recommendation>>,
    alerts: OnceLock<Vec<Alert>>,
}

impl Portfolio {
    /// Validates `config` and fixes the seed. Nothing is computed yet.
    pub fn new(catalog: Catalog, config: PipelineConfig) -> Result<Self, LedgerError> {
        config.validate()?;
        let seeds = SeedSource::from_optional(config.seed);
        Ok(Self {
            catalog,
            config,
            seeds,
            performance: OnceLock::new(),
            scores: OnceLock::new(),
            recommendations: OnceLock::new(),
            alerts: OnceLock::new(),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seeds.seed()
    }

    pub fn performance(&self) -> &[RoutePerformance] {
        self.performance
            .get_or_init(|| generate_performance(&self.catalog, &self.config, &self.seeds))
    }

    /// Scores in catalog order.
    pub fn scores(&self) -> &[RouteScore] {
        self.scores.get_or_init(|| {
            score_routes(&self.catalog, self.performance(), &self.config, &self.seeds)
        })
    }

    pub fn ranked(&self, query: &RankingQuery) -> Vec<&RouteScore> {
        rank_routes(self.scores(), query)
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        self.recommendations.get_or_init(|| {
            generate_recommendations(
                self.scores(),
                &self.catalog,
                self.config.recommendation_limit,
            )
        })
    }

    pub fn alerts(&self) -> &[Alert] {
        self.alerts.get_or_init(|| {
            generate_alerts(self.scores(), &self.catalog, &self.config, &self.seeds)
        })
    }

    pub fn insights(&self) -> InsightsSummary {
        InsightsSummary::new(self.recommendations(), self.alerts())
    }

    /// Forecast starting the day after the configured end date.
    pub fn forecast(&self, route_id: &str) -> RouteForecast {
        forecast_route(route_id, self.config.end_date, &self.seeds)
    }

    pub fn invalidate(&mut self) {
        self.performance.take();
        self.scores.take();
        self.recommendations.take();
        self.alerts.take();
    }

    pub fn reseed(&mut self, seed: u64) {
        log::debug!("Reseeding portfolio {} -> {}", self.seeds.seed(), seed);
        self.seeds = SeedSource::new(seed);
        self.config.seed = Some(seed);
        self.invalidate();
    }
}
