// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::advisory::{Advisory, Alert, Recommendation, RecommendationKind, Urgency};
use crate::classify::Classification;
use crate::scoring::RouteScore;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Total,
    Profitability,
    Operational,
    Strategic,
    Risk,
}

impl SortKey {
    fn value(self, score: &RouteScore) -> f64 {
        match self {
            SortKey::Total => score.total_score,
            SortKey::Profitability => score.profitability_score,
            SortKey::Operational => score.operational_score,
            SortKey::Strategic => score.strategic_score,
            SortKey::Risk => score.risk_score,
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().trim_end_matches("_score") {
            "total" => Ok(SortKey::Total),
            "profitability" => Ok(SortKey::Profitability),
            "operational" => Ok(SortKey::Operational),
            "strategic" => Ok(SortKey::Strategic),
            "risk" => Ok(SortKey::Risk),
            _ => Err(format!("Unknown sort key '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingQuery {
    pub classification: Option<Classification>,
    /// Case-insensitive substring of the route id.
    pub search: Option<String>,
    pub sort_by: SortKey,
}

impl RankingQuery {
    pub fn matches(&self, score: &RouteScore) -> bool {
        if let Some(class) = self.classification {
            if score.classification != class {
                return false;
            }
        }
        match &self.search {
            Some(term) if !term.is_empty() => score
                .route_id
                .to_lowercase()
                .contains(&term.to_lowercase()),
            _ => true,
        }
    }
}

/// Filtered scores, highest `sort_by` value first. Ties keep input order.
pub fn rank_routes<'a>(scores: &'a [RouteScore], query: &RankingQuery) -> Vec<&'a RouteScore> {
    let mut ranked: Vec<&RouteScore> = scores.iter().filter(|s| query.matches(s)).collect();
    ranked.sort_by(|a, b| {
        query
            .sort_by
            .value(b)
            .total_cmp(&query.sort_by.value(a))
    });
    ranked
}

/// Urgency and type filter over recommendations or alerts.
///
/// `K` is [`RecommendationKind`] or [`crate::advisory::AlertKind`]. Empty
/// fields match everything. Input order is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryQuery<K> {
    pub urgency: Option<Urgency>,
    pub kind: Option<K>,
}

impl<K> Default for AdvisoryQuery<K> {
    fn default() -> Self {
        Self {
            urgency: None,
            kind: None,
        }
    }
}

impl<K: Copy + PartialEq> AdvisoryQuery<K> {
    pub fn matches<A: Advisory<Kind = K>>(&self, item: &A) -> bool {
        self.urgency.map_or(true, |u| item.urgency() == u)
            && self.kind.map_or(true, |k| item.kind() == k)
    }

    pub fn filter<'a, A: Advisory<Kind = K>>(&self, items: &'a [A]) -> Vec<&'a A> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationStats {
    pub stars: usize,
    pub cash_cows: usize,
    pub question_marks: usize,
    pub dogs: usize,
}

impl ClassificationStats {
    pub fn from_scores(scores: &[RouteScore]) -> Self {
        let mut stats = Self::default();
        for score in scores {
            match score.classification {
                Classification::Stars => stats.stars += 1,
                Classification::CashCows => stats.cash_cows += 1,
                Classification::QuestionMarks => stats.question_marks += 1,
                Classification::Dogs => stats.dogs += 1,
            }
        }
        stats
    }

    pub fn count(&self, class: Classification) -> usize {
        match class {
            Classification::Stars => self.stars,
            Classification::CashCows => self.cash_cows,
            Classification::QuestionMarks => self.question_marks,
            Classification::Dogs => self.dogs,
        }
    }

    pub fn total(&self) -> usize {
        self.stars + self.cash_cows + self.question_marks + self.dogs
    }
}

/// Mean total score, or 0 for an empty portfolio.
pub fn average_total_score(scores: &[RouteScore]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(|s| s.total_score).sum::<f64>() / scores.len() as f64
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightsSummary {
    pub high_priority_alerts: usize,
    /// Sum of absolute potential savings; investments count as opportunity too.
    pub total_savings_opportunity: f64,
    pub immediate_actions: usize,
}

impl InsightsSummary {
    pub fn new(recommendations: &[Recommendation], alerts: &[Alert]) -> Self {
        Self {
            high_priority_alerts: alerts.iter().filter(|a| a.urgency == Urgency::High).count(),
            total_savings_opportunity: recommendations
                .iter()
                .map(|r| r.potential_savings.abs())
                .sum(),
            immediate_actions: recommendations
                .iter()
                .filter(|r| r.kind == RecommendationKind::ImmediateActions)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Trend;

    fn score(route_id: &str, total: f64, risk: f64) -> RouteScore {
        RouteScore {
            route_id: route_id.to_string(),
            profitability_score: 0.0,
            operational_score: 0.0,
            strategic_score: 0.0,
            risk_score: risk,
            total_score: total,
            classification: Classification::from_total(total),
            trend: Trend::Stable,
            avg_profit_margin: 0.0,
            avg_load_factor: 0.0,
            on_time_rate: 0.0,
            total_net_profit: 0.0,
        }
    }

    fn sample() -> Vec<RouteScore> {
        vec![
            score("LON-PAR", 82.0, 10.0),
            score("BRS-PRG", 30.0, 14.0),
            score("MAD-BCN", 70.0, 12.0),
            score("LON-NYC", 90.0, 9.0),
        ]
    }

    #[test]
    fn test_default_sort_by_total() {
        let scores = sample();
        let ids: Vec<&str> = rank_routes(&scores, &RankingQuery::default())
            .iter()
            .map(|s| s.route_id.as_str())
            .collect();
        assert_eq!(ids, vec!["LON-NYC", "LON-PAR", "MAD-BCN", "BRS-PRG"]);
    }

    #[test]
    fn test_filter_search_and_sort() {
        let scores = sample();
        let query = RankingQuery {
            classification: Some(Classification::Stars),
            search: Some("lon".to_string()),
            sort_by: SortKey::Risk,
        };
        let ids: Vec<&str> = rank_routes(&scores, &query)
            .iter()
            .map(|s| s.route_id.as_str())
            .collect();
        assert_eq!(ids, vec!["LON-PAR", "LON-NYC"]);
    }

    #[test]
    fn test_stats_and_average() {
        let scores = sample();
        let stats = ClassificationStats::from_scores(&scores);
        assert_eq!(stats.count(Classification::Stars), 2);
        assert_eq!(stats.cash_cows, 1);
        assert_eq!(stats.question_marks, 0);
        assert_eq!(stats.dogs, 1);
        assert_eq!(stats.total(), 4);

        assert_eq!(average_total_score(&scores), 68.0);
        assert_eq!(average_total_score(&[]), 0.0);
    }

    #[test]
    fn test_advisory_query() {
        use crate::advisory::{generate_alerts, generate_recommendations, AlertKind};
        use crate::catalog::Catalog;
        use crate::config::PipelineConfig;
        use crate::rng::SeedSource;

        let catalog = Catalog::builtin();
        let mut scores = sample();
        scores[1].trend = Trend::Down;
        let recs = generate_recommendations(&scores, catalog, 20);
        assert_eq!(recs.len(), 3);

        let high = AdvisoryQuery {
            urgency: Some(Urgency::High),
            kind: None,
        };
        let ids: Vec<&str> = high.filter(&recs).iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rec_1_1"]);

        let tactical = AdvisoryQuery {
            urgency: Some(Urgency::Medium),
            kind: Some(RecommendationKind::TacticalImprovements),
        };
        assert_eq!(tactical.filter(&recs).len(), 2);
        assert_eq!(AdvisoryQuery::default().filter(&recs).len(), 3);

        let config = PipelineConfig {
            competitive_threat_probability: 1.0,
            ..PipelineConfig::default()
        };
        let alerts = generate_alerts(&scores, catalog, &config, &SeedSource::new(3));
        let threats = AdvisoryQuery {
            urgency: None,
            kind: Some(AlertKind::CompetitiveThreats),
        };
        assert_eq!(threats.filter(&alerts).len(), 4);

        let degraded = AdvisoryQuery {
            urgency: Some(Urgency::High),
            kind: Some(AlertKind::PerformanceDegradation),
        };
        let matched = degraded.filter(&alerts);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].route_id, "BRS-PRG");
        assert!(!degraded.matches(&alerts[0]));
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("risk_score".parse(), Ok(SortKey::Risk));
        assert_eq!("Total".parse(), Ok(SortKey::Total));
        assert!("speed".parse::<SortKey>().is_err());
    }
}
