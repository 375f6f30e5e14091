// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Multi-factor route scoring.
//!
//! Each sub-score blends its own inputs with fixed inner weights and is then
//! scaled by its outer weight from [`ScoreWeights`], so the four sub-scores
//! add up directly to the total:
//!
//! | Sub-score | Inputs | Outer weight |
//! |-----------|--------|--------------|
//! | Profitability | margin + 20, profit / 1M x 10, margin x 2 | 0.40 |
//! | Operational | load factor, on-time rate, utilization 85 | 0.25 |
//! | Strategic | importance tier, market tier, growth proxy | 0.20 |
//! | Risk | inverted volatility, competition, seasonality | 0.15 |

use crate::catalog::{Catalog, RouteMaster};
use crate::classify::{Classification, Trend};
use crate::config::{PipelineConfig, ScoreWeights};
use crate::rng::{SeedSource, Stage};
use crate::synth::RoutePerformance;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fleet utilization is not modelled; every route is assumed to fly at 85.
const ASSUMED_UTILIZATION: f64 = 85.0;

fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Aggregates over the trailing scoring window of one route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowMetrics {
    pub days: usize,
    pub avg_profit_margin: f64,
    pub avg_load_factor: f64,
    /// Fraction of on-time departures, 0..=1.
    pub on_time_rate: f64,
    pub total_net_profit: f64,
}

impl WindowMetrics {
    /// An empty window yields all-zero metrics.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RoutePerformance>,
    {
        let mut metrics = WindowMetrics::default();
        let mut margin_sum = 0.0;
        let mut load_sum = 0.0;
        let mut on_time = 0usize;

        for record in records {
            metrics.days += 1;
            margin_sum += record.profit_margin;
            load_sum += record.load_factor;
            metrics.total_net_profit += record.net_profit;
            if record.on_time_departure {
                on_time += 1;
            }
        }

        if metrics.days > 0 {
            let n = metrics.days as f64;
            metrics.avg_profit_margin = margin_sum / n;
            metrics.avg_load_factor = load_sum / n;
            metrics.on_time_rate = on_time as f64 / n;
        }
        metrics
    }
}

/// Market signals that are simulated rather than measured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketDraws {
    /// Growth-rate proxy, 50..80.
    pub growth_rate: f64,
    /// 0..40, higher is riskier.
    pub demand_volatility: f64,
    /// 0..50, higher is riskier.
    pub competition_intensity: f64,
    /// 0..30, higher is riskier.
    pub seasonality_impact: f64,
}

impl MarketDraws {
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self {
            growth_rate: rng.gen_range(50.0..80.0),
            demand_volatility: rng.gen_range(0.0..40.0),
            competition_intensity: rng.gen_range(0.0..50.0),
            seasonality_impact: rng.gen_range(0.0..30.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteScore {
    pub route_id: String,
    pub profitability_score: f64,
    pub operational_score: f64,
    pub strategic_score: f64,
    pub risk_score: f64,
    pub total_score: f64,
    pub classification: Classification,
    pub trend: Trend,
    pub avg_profit_margin: f64,
    pub avg_load_factor: f64,
    pub on_time_rate: f64,
    pub total_net_profit: f64,
}

pub fn profitability_score(metrics: &WindowMetrics, weight: f64) -> f64 {
    let margin = metrics.avg_profit_margin;
    (clamp_score(margin + 20.0) * 0.4
        + clamp_score(metrics.total_net_profit / 1_000_000.0 * 10.0) * 0.3
        + clamp_score(margin * 2.0) * 0.3)
        * weight
}

pub fn operational_score(metrics: &WindowMetrics, weight: f64) -> f64 {
    (metrics.avg_load_factor * 0.4
        + metrics.on_time_rate * 100.0 * 0.3
        + ASSUMED_UTILIZATION * 0.3)
        * weight
}

pub fn strategic_score(route: &RouteMaster, draws: &MarketDraws, weight: f64) -> f64 {
    (route.strategic_importance.tier_value() * 0.4
        + route.market_size.tier_value() * 0.3
        + clamp_score(draws.growth_rate) * 0.3)
        * weight
}

pub fn risk_score(draws: &MarketDraws, weight: f64) -> f64 {
    ((100.0 - draws.demand_volatility.min(100.0)) * 0.35
        + (100.0 - draws.competition_intensity.min(100.0)) * 0.35
        + (100.0 - draws.seasonality_impact.min(100.0)) * 0.30)
        * weight
}

/// Scores one route from its window metrics and market draws.
pub fn score_route_with(
    route: &RouteMaster,
    metrics: &WindowMetrics,
    draws: &MarketDraws,
    weights: &ScoreWeights,
) -> RouteScore {
    let profitability = profitability_score(metrics, weights.profitability);
    let operational = operational_score(metrics, weights.operational);
    let strategic = strategic_score(route, draws, weights.strategic);
    let risk = risk_score(draws, weights.risk);
    let total = clamp_score(profitability + operational + strategic + risk);

    RouteScore {
        route_id: route.route_id.clone(),
        profitability_score: profitability,
        operational_score: operational,
        strategic_score: strategic,
        risk_score: risk,
        total_score: total,
        classification: Classification::from_total(total),
        trend: Trend::from_margin(metrics.avg_profit_margin),
        avg_profit_margin: metrics.avg_profit_margin,
        avg_load_factor: metrics.avg_load_factor,
        on_time_rate: metrics.on_time_rate,
        total_net_profit: metrics.total_net_profit,
    }
}

/// The last `window` records of `route_id`, in input order.
pub fn trailing_window<'a>(
    records: &'a [RoutePerformance],
    route_id: &str,
    window: usize,
) -> Vec<&'a RoutePerformance> {
    let mut matching: Vec<&RoutePerformance> =
        records.iter().filter(|r| r.route_id == route_id).collect();
    let skip = matching.len().saturating_sub(window);
    matching.split_off(skip)
}

/// Scores every catalog route, in catalog order.
pub fn score_routes(
    catalog: &Catalog,
    records: &[RoutePerformance],
    config: &PipelineConfig,
    seeds: &SeedSource,
) -> Vec<RouteScore> {
    let scores: Vec<RouteScore> = catalog
        .routes()
        .iter()
        .enumerate()
        .map(|(index, route)| {
            let window = trailing_window(records, &route.route_id, config.scoring_window_days);
            if window.is_empty() {
                log::warn!("No performance records for {}", route.route_id);
            }
            let metrics = WindowMetrics::from_records(window);
            let mut rng = seeds.stream(Stage::Scoring, index as u64);
            let draws = MarketDraws::sample(&mut rng);
            score_route_with(route, &metrics, &draws, &config.weights)
        })
        .collect();

    log::debug!("Scored {} routes", scores.len());
    scores
}

/// Scores sorted by total, best first. Ties keep catalog order.
pub fn rank_by_total(scores: &[RouteScore]) -> Vec<RouteScore> {
    let mut ranked = scores.to_vec();
    ranked.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
    ranked
}
