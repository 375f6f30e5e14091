// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Template-driven recommendations and alerts.
//!
//! Both generators walk the scores in the order they are given (catalog
//! order for [`crate::score_routes`] output) and stop at the configured
//! limit. Nothing is re-ranked by value or urgency.

use crate::catalog::Catalog;
use crate::classify::{normalized_key, Classification, Trend};
use crate::config::PipelineConfig;
use crate::rng::{SeedSource, Stage};
use crate::scoring::RouteScore;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A degradation alert fires when a declining route scores below this.
const DEGRADATION_SCORE_CEILING: f64 = 50.0;

/// Alert dates, in days before the end of the synthesis window.
const DEGRADATION_LEAD_DAYS: i64 = 16;
const THREAT_LEAD_DAYS: i64 = 17;

fn days_before(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_sub_signed(Duration::days(days)).unwrap_or(date)
}

/// Recommendation buckets of the advisory feed.
///
/// The templates only produce tactical improvements and strategic
/// decisions. `ImmediateActions` is kept so the wire vocabulary stays
/// complete for consumers that filter or count on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    ImmediateActions,
    TacticalImprovements,
    StrategicDecisions,
}

impl FromStr for RecommendationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized_key(s).as_str() {
            "immediateactions" | "immediate" => Ok(RecommendationKind::ImmediateActions),
            "tacticalimprovements" | "tactical" => Ok(RecommendationKind::TacticalImprovements),
            "strategicdecisions" | "strategic" => Ok(RecommendationKind::StrategicDecisions),
            _ => Err(format!("Unknown recommendation type '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    High,
    Medium,
    Low,
}

/// `Hard` is never produced by the templates; it completes the wire vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effort {
    Easy,
    Medium,
    Hard,
}

/// `LongTerm` is never produced by the templates; it completes the wire vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    Immediate,
    #[serde(rename = "Short-term")]
    ShortTerm,
    #[serde(rename = "Long-term")]
    LongTerm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::High => "high",
            Urgency::Medium => "medium",
            Urgency::Low => "low",
        }
    }
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized_key(s).as_str() {
            "high" => Ok(Urgency::High),
            "medium" => Ok(Urgency::Medium),
            "low" => Ok(Urgency::Low),
            _ => Err(format!("Unknown urgency '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub route_id: String,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub category: String,
    pub title: String,
    pub description: String,
    pub impact: Level,
    pub effort: Effort,
    pub timeline: Timeline,
    pub confidence: Level,
    /// Negative values are required investment rather than savings.
    pub potential_savings: f64,
    pub urgency: Urgency,
}

/// Alert buckets of the advisory feed.
///
/// Only degradation and competitive-threat alerts are generated.
/// `OpportunityWindows` and `OperationalIssues` keep the wire vocabulary
/// complete for consumers that filter on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    PerformanceDegradation,
    CompetitiveThreats,
    OpportunityWindows,
    OperationalIssues,
}

impl FromStr for AlertKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized_key(s).as_str() {
            "performancedegradation" | "degradation" => Ok(AlertKind::PerformanceDegradation),
            "competitivethreats" | "competitive" => Ok(AlertKind::CompetitiveThreats),
            "opportunitywindows" | "opportunity" => Ok(AlertKind::OpportunityWindows),
            "operationalissues" | "operational" => Ok(AlertKind::OperationalIssues),
            _ => Err(format!("Unknown alert type '{}'", s)),
        }
    }
}

/// Common view over recommendations and alerts for filtering.
pub trait Advisory {
    type Kind: Copy + PartialEq;

    fn kind(&self) -> Self::Kind;
    fn urgency(&self) -> Urgency;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub route_id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub title: String,
    pub description: String,
    pub impact_assessment: String,
    pub recommended_action: String,
    pub urgency: Urgency,
    pub created_date: NaiveDate,
}

impl Advisory for Recommendation {
    type Kind = RecommendationKind;

    fn kind(&self) -> RecommendationKind {
        self.kind
    }

    fn urgency(&self) -> Urgency {
        self.urgency
    }
}

impl Advisory for Alert {
    type Kind = AlertKind;

    fn kind(&self) -> AlertKind {
        self.kind
    }

    fn urgency(&self) -> Urgency {
        self.urgency
    }
}

fn route_name<'a>(catalog: &'a Catalog, route_id: &'a str) -> &'a str {
    catalog
        .find(route_id)
        .map(|r| r.route_name.as_str())
        .unwrap_or(route_id)
}

/// The template for one scored route, if its class gets one.
pub fn recommendation_for(
    position: usize,
    score: &RouteScore,
    route_name: &str,
) -> Option<Recommendation> {
    let rec = match score.classification {
        Classification::Dogs => Recommendation {
            id: format!("rec_{}_1", position),
            route_id: score.route_id.clone(),
            kind: RecommendationKind::StrategicDecisions,
            category: "route_exits".to_string(),
            title: format!("Consider discontinuing {}", route_name),
            description: format!(
                "Route consistently underperforming with score {:.0}/100. Low load factors and negative margins.",
                score.total_score
            ),
            impact: Level::High,
            effort: Effort::Medium,
            timeline: Timeline::ShortTerm,
            confidence: Level::High,
            potential_savings: 2_400_000.0,
            urgency: Urgency::High,
        },
        Classification::QuestionMarks => Recommendation {
            id: format!("rec_{}_2", position),
            route_id: score.route_id.clone(),
            kind: RecommendationKind::TacticalImprovements,
            category: "schedule_optimization".to_string(),
            title: format!("Optimize schedule for {}", route_name),
            description: "Route shows potential but needs better timing. Consider adjusting departure times or frequency.".to_string(),
            impact: Level::Medium,
            effort: Effort::Easy,
            timeline: Timeline::Immediate,
            confidence: Level::Medium,
            potential_savings: 800_000.0,
            urgency: Urgency::Medium,
        },
        Classification::Stars => Recommendation {
            id: format!("rec_{}_3", position),
            route_id: score.route_id.clone(),
            kind: RecommendationKind::TacticalImprovements,
            category: "pricing_opportunities".to_string(),
            title: format!("Increase capacity on {}", route_name),
            description: "High-performing route with potential for growth. Consider increasing frequency or larger aircraft.".to_string(),
            impact: Level::High,
            effort: Effort::Medium,
            timeline: Timeline::ShortTerm,
            confidence: Level::High,
            potential_savings: -1_500_000.0,
            urgency: Urgency::Medium,
        },
        Classification::CashCows => return None,
    };
    Some(rec)
}

/// At most `limit` recommendations, in the order of `scores`.
pub fn generate_recommendations(
    scores: &[RouteScore],
    catalog: &Catalog,
    limit: usize,
) -> Vec<Recommendation> {
    scores
        .iter()
        .enumerate()
        .filter_map(|(position, score)| {
            recommendation_for(position, score, route_name(catalog, &score.route_id))
        })
        .take(limit)
        .collect()
}

pub fn is_degrading(score: &RouteScore) -> bool {
    score.trend == Trend::Down && score.total_score < DEGRADATION_SCORE_CEILING
}

fn degradation_alert(position: usize, score: &RouteScore, name: &str, date: NaiveDate) -> Alert {
    Alert {
        id: format!("alert_{}_1", position),
        route_id: score.route_id.clone(),
        kind: AlertKind::PerformanceDegradation,
        title: format!("Performance declining on {}", name),
        description: "Route has shown 3 consecutive weeks of declining profitability".to_string(),
        impact_assessment: "Potential $200K monthly loss if trend continues".to_string(),
        recommended_action: "Investigate pricing strategy and competitor analysis".to_string(),
        urgency: Urgency::High,
        created_date: date,
    }
}

fn competitive_threat_alert(
    position: usize,
    score: &RouteScore,
    name: &str,
    date: NaiveDate,
) -> Alert {
    Alert {
        id: format!("alert_{}_2", position),
        route_id: score.route_id.clone(),
        kind: AlertKind::CompetitiveThreats,
        title: format!("New competitor on {}", name),
        description: "Budget airline announced new service starting next month".to_string(),
        impact_assessment: "Estimated 15-20% passenger loss without response".to_string(),
        recommended_action: "Consider price adjustment or schedule optimization".to_string(),
        urgency: Urgency::Medium,
        created_date: date,
    }
}

/// At most `config.alert_limit` alerts, in the order of `scores`.
///
/// Degradation alerts are deterministic. Competitive threats are rolled per
/// route with `config.competitive_threat_probability`.
pub fn generate_alerts(
    scores: &[RouteScore],
    catalog: &Catalog,
    config: &PipelineConfig,
    seeds: &SeedSource,
) -> Vec<Alert> {
    let degradation_date = days_before(config.end_date, DEGRADATION_LEAD_DAYS);
    let threat_date = days_before(config.end_date, THREAT_LEAD_DAYS);
    let mut alerts = Vec::new();

    for (position, score) in scores.iter().enumerate() {
        let name = route_name(catalog, &score.route_id);

        if is_degrading(score) {
            alerts.push(degradation_alert(position, score, name, degradation_date));
        }

        let mut rng = seeds.stream(Stage::Alerts, position as u64);
        if rng.gen_bool(config.competitive_threat_probability) {
            alerts.push(competitive_threat_alert(position, score, name, threat_date));
        }

        if alerts.len() >= config.alert_limit {
            break;
        }
    }

    alerts.truncate(config.alert_limit);
    log::debug!("Generated {} alerts", alerts.len());
    alerts
}
