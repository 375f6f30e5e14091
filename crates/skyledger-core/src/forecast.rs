// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! 90-day forward demand forecast and per-route risk profiles.
//!
//! Both tables are keyed by route id and cover only a handful of routes.
//! Any other id resolves to the LON-PAR entry. The lookup reports when that
//! happens so callers can tell a real forecast from a borrowed one.

use crate::advisory::Level;
use crate::rng::{SeedSource, Stage};
use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const FORECAST_DAYS: u32 = 90;
pub const FALLBACK_ROUTE: &str = "LON-PAR";
/// Summary horizons in days with the confidence (percent) quoted for each.
pub static HORIZONS: [(usize, f64); 3] = [(30, 92.0), (60, 85.0), (90, 78.0)];

/// Confidence of the shortest quoted horizon covering `days`.
pub fn horizon_confidence(days: usize) -> f64 {
    HORIZONS
        .iter()
        .find(|(horizon, _)| days <= *horizon)
        .or(HORIZONS.last())
        .map_or(0.0, |(_, confidence)| *confidence)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outlook {
    Growing,
    Declining,
}

impl Outlook {
    /// Demand growth over the full forecast horizon.
    fn trend(self) -> f64 {
        match self {
            Outlook::Growing => 1.02,
            Outlook::Declining => 0.98,
        }
    }

    fn seasonal_factor(self, date: NaiveDate) -> f64 {
        let month = date.month();
        match self {
            // Leisure-driven: June to September peak.
            Outlook::Declining => {
                if (6..=9).contains(&month) {
                    1.3
                } else {
                    0.7
                }
            }
            // Business-driven: December to February holiday dip.
            Outlook::Growing => {
                if month == 12 || month <= 2 {
                    0.9
                } else {
                    1.1
                }
            }
        }
    }
}

/// Daily baseline the forecast scales from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseMetrics {
    pub passengers: f64,
    pub revenue: f64,
    pub load_factor: f64,
    pub outlook: Outlook,
}

static BASE_METRICS: [(&str, BaseMetrics); 4] = [
    (
        "LON-PAR",
        BaseMetrics {
            passengers: 3500.0,
            revenue: 210_000.0,
            load_factor: 78.0,
            outlook: Outlook::Growing,
        },
    ),
    (
        "LON-NYC",
        BaseMetrics {
            passengers: 3200.0,
            revenue: 580_000.0,
            load_factor: 82.0,
            outlook: Outlook::Growing,
        },
    ),
    (
        "BRS-PRG",
        BaseMetrics {
            passengers: 1000.0,
            revenue: 65_000.0,
            load_factor: 45.0,
            outlook: Outlook::Declining,
        },
    ),
    (
        "MIA-NYC",
        BaseMetrics {
            passengers: 2900.0,
            revenue: 435_000.0,
            load_factor: 75.0,
            outlook: Outlook::Growing,
        },
    ),
];

/// Routes with their own forecast baseline.
pub fn baseline_routes() -> impl Iterator<Item = &'static str> {
    BASE_METRICS.iter().map(|(id, _)| *id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lookup {
    Exact,
    Fallback,
}

fn lookup<'a, T>(table: &'a [(&'static str, T)], route_id: &str) -> Option<(&'a T, Lookup)> {
    if let Some((_, entry)) = table.iter().find(|(id, _)| *id == route_id) {
        return Some((entry, Lookup::Exact));
    }
    table
        .iter()
        .find(|(id, _)| *id == FALLBACK_ROUTE)
        .map(|(_, entry)| (entry, Lookup::Fallback))
}

pub fn base_metrics(route_id: &str) -> (BaseMetrics, Lookup) {
    match lookup(&BASE_METRICS[..], route_id) {
        Some((metrics, how)) => (*metrics, how),
        None => (BASE_METRICS[0].1, Lookup::Fallback),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub day: u32,
    pub passengers: f64,
    pub revenue: f64,
    pub load_factor: f64,
    pub passengers_lower: f64,
    pub passengers_upper: f64,
    pub revenue_lower: f64,
    pub revenue_upper: f64,
    pub profit_probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonSummary {
    pub days: usize,
    pub passengers: f64,
    pub revenue: f64,
    pub avg_load_factor: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteForecast {
    pub route_id: String,
    pub lookup: Lookup,
    pub as_of: NaiveDate,
    pub points: Vec<ForecastPoint>,
}

impl RouteForecast {
    pub fn summary(&self, days: usize) -> HorizonSummary {
        let window = &self.points[..days.min(self.points.len())];
        let avg_load_factor = if window.is_empty() {
            0.0
        } else {
            window.iter().map(|p| p.load_factor).sum::<f64>() / window.len() as f64
        };
        HorizonSummary {
            days: window.len(),
            passengers: window.iter().map(|p| p.passengers).sum(),
            revenue: window.iter().map(|p| p.revenue).sum(),
            avg_load_factor,
            confidence: horizon_confidence(window.len()),
        }
    }

    pub fn horizons(&self) -> Vec<HorizonSummary> {
        HORIZONS.iter().map(|&(days, _)| self.summary(days)).collect()
    }
}

/// Band half-width as a fraction of the point estimate, widening with lead time.
pub fn confidence_width(day: u32) -> f64 {
    (0.1 + day as f64 / FORECAST_DAYS as f64 * 0.2).min(0.3)
}

// FNV-1a, so unknown ids still get a stable stream.
fn route_stream(route_id: &str) -> u64 {
    route_id
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
            (hash ^ byte as u64).wrapping_mul(0x0100_0000_01b3)
        })
}

/// Forecasts the 90 days following `as_of`.
pub fn forecast_route(route_id: &str, as_of: NaiveDate, seeds: &SeedSource) -> RouteForecast {
    let (base, how) = base_metrics(route_id);
    if how == Lookup::Fallback {
        log::warn!(
            "No forecast baseline for {}, borrowing {}",
            route_id,
            FALLBACK_ROUTE
        );
    }

    let mut rng = seeds.stream(Stage::Forecast, route_stream(route_id));
    let points = (1..=FORECAST_DAYS)
        .map(|day| {
            let date = as_of + Duration::days(day as i64);
            let factor = base.outlook.seasonal_factor(date)
                * base.outlook.trend().powf(day as f64 / FORECAST_DAYS as f64)
                * rng.gen_range(0.85..1.15);

            let passengers = (base.passengers * factor).round();
            let revenue = (base.revenue * factor).round();
            let load_factor = (base.load_factor * factor).round().clamp(30.0, 95.0);
            let width = confidence_width(day);

            let profit_probability = match base.outlook {
                Outlook::Declining => (80.0 - day as f64).max(10.0),
                Outlook::Growing => (85.0 + rng.gen_range(0.0..10.0_f64)).min(95.0),
            };

            ForecastPoint {
                date,
                day,
                passengers,
                revenue,
                load_factor,
                passengers_lower: (passengers * (1.0 - width)).round(),
                passengers_upper: (passengers * (1.0 + width)).round(),
                revenue_lower: (revenue * (1.0 - width)).round(),
                revenue_upper: (revenue * (1.0 + width)).round(),
                profit_probability,
            }
        })
        .collect();

    RouteForecast {
        route_id: route_id.to_string(),
        lookup: how,
        as_of,
        points,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub volatility: Level,
    pub competition_intensity: Level,
    pub seasonal_impact: Level,
    pub overall_risk: Level,
    pub risk_score: u32,
}

static RISK_PROFILES: [(&str, RiskProfile); 3] = [
    (
        "LON-PAR",
        RiskProfile {
            volatility: Level::Low,
            competition_intensity: Level::High,
            seasonal_impact: Level::Medium,
            overall_risk: Level::Medium,
            risk_score: 35,
        },
    ),
    (
        "BRS-PRG",
        RiskProfile {
            volatility: Level::High,
            competition_intensity: Level::Low,
            seasonal_impact: Level::High,
            overall_risk: Level::High,
            risk_score: 75,
        },
    ),
    (
        "LON-NYC",
        RiskProfile {
            volatility: Level::Medium,
            competition_intensity: Level::High,
            seasonal_impact: Level::Low,
            overall_risk: Level::Medium,
            risk_score: 45,
        },
    ),
];

pub fn risk_profile(route_id: &str) -> (RiskProfile, Lookup) {
    match lookup(&RISK_PROFILES[..], route_id) {
        Some((profile, how)) => (*profile, how),
        None => (RISK_PROFILES[0].1, Lookup::Fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_known_route_lookup() {
        let (metrics, how) = base_metrics("BRS-PRG");
        assert_eq!(how, Lookup::Exact);
        assert_eq!(metrics.outlook, Outlook::Declining);
        assert_eq!(metrics.passengers, 1000.0);
    }

    #[test]
    fn test_unknown_route_falls_back() {
        let (metrics, how) = base_metrics("NUE-STR");
        assert_eq!(how, Lookup::Fallback);
        assert_eq!(metrics, base_metrics("LON-PAR").0);

        let (profile, how) = risk_profile("MIA-NYC");
        assert_eq!(how, Lookup::Fallback);
        assert_eq!(profile.risk_score, 35);
    }

    #[test]
    fn test_confidence_width() {
        assert!((confidence_width(0) - 0.1).abs() < 1e-12);
        assert!((confidence_width(45) - 0.2).abs() < 1e-12);
        assert!((confidence_width(90) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_forecast_shape() {
        let forecast = forecast_route("LON-NYC", as_of(), &SeedSource::new(3));
        assert_eq!(forecast.points.len(), 90);
        assert_eq!(forecast.lookup, Lookup::Exact);
        assert_eq!(
            forecast.points[0].date,
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
        );

        for point in &forecast.points {
            assert!((30.0..=95.0).contains(&point.load_factor));
            assert!(point.passengers_lower <= point.passengers);
            assert!(point.passengers <= point.passengers_upper);
            assert!(point.revenue_lower <= point.revenue_upper);
            assert!((85.0..=95.0).contains(&point.profit_probability));
        }
    }

    #[test]
    fn test_declining_profit_probability() {
        let forecast = forecast_route("BRS-PRG", as_of(), &SeedSource::new(3));
        assert_eq!(forecast.points[0].profit_probability, 79.0);
        assert_eq!(forecast.points[69].profit_probability, 10.0);
        assert_eq!(forecast.points[89].profit_probability, 10.0);
    }

    #[test]
    fn test_horizon_summaries() {
        let forecast = forecast_route("LON-PAR", as_of(), &SeedSource::new(8));
        let horizons = forecast.horizons();
        assert_eq!(horizons.len(), 3);
        assert_eq!(horizons[0].days, 30);
        assert_eq!(horizons[2].days, 90);
        assert!(horizons[0].passengers < horizons[1].passengers);
        assert!(horizons[1].revenue < horizons[2].revenue);

        let expected: f64 = forecast.points[..30].iter().map(|p| p.passengers).sum();
        assert_eq!(horizons[0].passengers, expected);

        let confidences: Vec<f64> = horizons.iter().map(|h| h.confidence).collect();
        assert_eq!(confidences, vec![92.0, 85.0, 78.0]);
    }

    #[test]
    fn test_horizon_confidence_between_quotes() {
        assert_eq!(horizon_confidence(1), 92.0);
        assert_eq!(horizon_confidence(31), 85.0);
        assert_eq!(horizon_confidence(90), 78.0);
        assert_eq!(horizon_confidence(365), 78.0);
    }

    #[test]
    fn test_forecast_is_seeded() {
        let a = forecast_route("MIA-NYC", as_of(), &SeedSource::new(21));
        let b = forecast_route("MIA-NYC", as_of(), &SeedSource::new(21));
        assert_eq!(a, b);
    }
}
