// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! CSV and JSON report writers.

use crate::advisory::{Alert, Recommendation};
use crate::forecast::RouteForecast;
use crate::ranking::InsightsSummary;
use crate::scoring::RouteScore;
use crate::synth::RoutePerformance;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes one CSV row per item, with a header taken from the field names.
pub fn write_csv<W, T>(writer: W, rows: &[T]) -> Result<()>
where
    W: Write,
    T: Serialize,
{
    let mut csv = csv::Writer::from_writer(writer);
    for (index, row) in rows.iter().enumerate() {
        csv.serialize(row)
            .with_context(|| format!("Failed to serialize CSV row {}", index))?;
    }
    csv.flush().context("Failed to flush CSV output")?;
    Ok(())
}

pub fn write_csv_file<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(file, rows).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Everything `export_all` writes.
pub struct ExportSet<'a> {
    pub performance: &'a [RoutePerformance],
    pub scores: &'a [RouteScore],
    pub recommendations: &'a [Recommendation],
    pub alerts: &'a [Alert],
    pub insights: InsightsSummary,
    pub forecasts: &'a [RouteForecast],
}

/// Writes the full report set into `dir`, creating it if needed.
/// Returns the written paths in write order.
pub fn export_all(dir: &Path, set: &ExportSet<'_>) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let mut written = Vec::new();
    let mut record = |name: &str| {
        let path = dir.join(name);
        written.push(path.clone());
        path
    };

    write_csv_file(&record("route_performance.csv"), set.performance)?;
    write_csv_file(&record("route_scores.csv"), set.scores)?;
    write_json_file(&record("route_scores.json"), set.scores)?;
    write_csv_file(&record("recommendations.csv"), set.recommendations)?;
    write_json_file(&record("recommendations.json"), set.recommendations)?;
    write_csv_file(&record("alerts.csv"), set.alerts)?;
    write_json_file(&record("alerts.json"), set.alerts)?;
    write_json_file(&record("insights.json"), &set.insights)?;

    for forecast in set.forecasts {
        let stem = format!("forecast_{}", forecast.route_id);
        write_csv_file(&record(&format!("{}.csv", stem)), &forecast.points)?;
        write_json_file(&record(&format!("{}.json", stem)), forecast)?;
    }

    log::info!("Exported {} files to {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::config::PipelineConfig;
    use crate::forecast::forecast_route;
    use crate::rng::SeedSource;
    use crate::synth::generate_performance;
    use crate::{generate_alerts, generate_recommendations, score_routes};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[derive(Serialize)]
    struct Row {
        route_id: &'static str,
        total: f64,
    }

    #[test]
    fn test_csv_header_and_rows() {
        let mut out = Vec::new();
        let rows = [
            Row {
                route_id: "LON-PAR",
                total: 81.5,
            },
            Row {
                route_id: "BRS-PRG",
                total: 22.0,
            },
        ];
        write_csv(&mut out, &rows).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["route_id,total", "LON-PAR,81.5", "BRS-PRG,22.0"]);
    }

    #[test]
    fn test_export_all() {
        let catalog = Catalog::builtin();
        let config = PipelineConfig {
            start_date: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            ..PipelineConfig::default()
        };
        let seeds = SeedSource::new(5);
        let performance = generate_performance(catalog, &config, &seeds);
        let scores = score_routes(catalog, &performance, &config, &seeds);
        let recommendations =
            generate_recommendations(&scores, catalog, config.recommendation_limit);
        let alerts = generate_alerts(&scores, catalog, &config, &seeds);
        let forecasts = vec![forecast_route("LON-PAR", config.end_date, &seeds)];

        let dir = tempdir().unwrap();
        let out = dir.path().join("reports");
        let written = export_all(
            &out,
            &ExportSet {
                performance: &performance,
                scores: &scores,
                recommendations: &recommendations,
                alerts: &alerts,
                insights: InsightsSummary::new(&recommendations, &alerts),
                forecasts: &forecasts,
            },
        )
        .unwrap();

        assert_eq!(written.len(), 10);
        assert!(written.iter().all(|p| p.exists()));

        let csv = fs::read_to_string(out.join("route_performance.csv")).unwrap();
        assert_eq!(csv.lines().count(), 1 + 50 * 31);
        assert!(csv.starts_with("date,route_id,flight_number"));

        let json = fs::read_to_string(out.join("route_scores.json")).unwrap();
        let parsed: Vec<RouteScore> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), scores.len());
        assert_eq!(parsed[0].route_id, scores[0].route_id);
        assert_eq!(parsed[0].classification, scores[0].classification);
    }
}
