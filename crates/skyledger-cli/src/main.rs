// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use skyledger_core::advisory::{AlertKind, RecommendationKind, Urgency};
use skyledger_core::forecast::{baseline_routes, forecast_route, risk_profile, Lookup};
use skyledger_core::ranking::{
    average_total_score, AdvisoryQuery, ClassificationStats, RankingQuery, SortKey,
};
use skyledger_core::report::{export_all, ExportSet};
use skyledger_core::rng::SeedSource;
use skyledger_core::{Catalog, Classification, PipelineConfig, Portfolio};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the pipeline configuration (JSON)
    #[arg(short, long, env = "SKYLEDGER_CONFIG")]
    config: Option<PathBuf>,

    /// Root seed; overrides the configured one
    #[arg(short, long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the route catalog
    Routes,
    /// Show route scores, best first
    Scores {
        /// Only show one classification, e.g. "cash-cows"
        #[arg(long)]
        class: Option<Classification>,
        /// Case-insensitive route id filter
        #[arg(long)]
        search: Option<String>,
        /// total, profitability, operational, strategic or risk
        #[arg(long, default_value = "total")]
        sort: SortKey,
    },
    /// List recommendations
    Recommendations {
        /// high, medium or low
        #[arg(long)]
        urgency: Option<Urgency>,
        /// immediate, tactical or strategic
        #[arg(long = "type")]
        kind: Option<RecommendationKind>,
    },
    /// List alerts
    Alerts {
        /// high, medium or low
        #[arg(long)]
        urgency: Option<Urgency>,
        /// degradation, competitive, opportunity or operational
        #[arg(long = "type")]
        kind: Option<AlertKind>,
    },
    /// 90-day forecast for one route
    Forecast {
        route: String,
        /// Forecast starts the day after this date (default: configured end date)
        #[arg(long)]
        start: Option<NaiveDate>,
    },
    /// Write all CSV and JSON reports into a directory
    Export { dir: PathBuf },
    /// Configuration file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration
    Init { path: Option<PathBuf> },
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")
}

fn load_config(path: &Path, seed: Option<u64>) -> Result<PipelineConfig> {
    let mut config = PipelineConfig::load(path)?;
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

fn print_routes(catalog: &Catalog) {
    println!(
        "{:<8} {:<28} {:<14} {:<7} {:<12} {:<7} {:>6}",
        "ID", "Name", "Type", "Market", "Hub", "Import.", "km"
    );
    for route in catalog.routes() {
        println!(
            "{:<8} {:<28} {:<14} {:<7} {:<12} {:<7} {:>6}",
            route.route_id,
            route.route_name,
            route.route_type,
            route.market_size,
            route.hub_classification,
            route.strategic_importance,
            route.distance_km
        );
    }
    println!("{} routes", catalog.len());
}

fn print_insights(portfolio: &Portfolio) {
    let insights = portfolio.insights();
    println!();
    println!("High-priority alerts:      {}", insights.high_priority_alerts);
    println!(
        "Savings opportunity:       {:.0}",
        insights.total_savings_opportunity
    );
    println!("Immediate actions:         {}", insights.immediate_actions);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config_path = cli.config.clone().unwrap_or_else(PipelineConfig::default_path);

    if let Commands::Config {
        action: ConfigAction::Init { path },
    } = &cli.command
    {
        let target = path.clone().unwrap_or(config_path);
        PipelineConfig::default().save(&target)?;
        println!("Wrote default configuration to {}", target.display());
        return Ok(());
    }

    let config = load_config(&config_path, cli.seed)?;
    let portfolio = Portfolio::new(Catalog::builtin().clone(), config)?;
    log::info!("Seed {}", portfolio.seed());

    match &cli.command {
        Commands::Routes => print_routes(portfolio.catalog()),
        Commands::Scores {
            class,
            search,
            sort,
        } => {
            let query = RankingQuery {
                classification: *class,
                search: search.clone(),
                sort_by: *sort,
            };
            println!(
                "{:<8} {:>7} {:>7} {:>7} {:>7} {:>7}  {:<15} {:<6}",
                "ID", "Total", "Profit", "Ops", "Strat", "Risk", "Class", "Trend"
            );
            for score in portfolio.ranked(&query) {
                println!(
                    "{:<8} {:>7.1} {:>7.1} {:>7.1} {:>7.1} {:>7.1}  {:<15} {:<6}",
                    score.route_id,
                    score.total_score,
                    score.profitability_score,
                    score.operational_score,
                    score.strategic_score,
                    score.risk_score,
                    score.classification,
                    score.trend
                );
            }

            let stats = ClassificationStats::from_scores(portfolio.scores());
            println!();
            for class in Classification::ALL {
                println!("{:<15} {}", class, stats.count(class));
            }
            println!(
                "Average total score: {:.1}",
                average_total_score(portfolio.scores())
            );
        }
        Commands::Recommendations { urgency, kind } => {
            let query = AdvisoryQuery {
                urgency: *urgency,
                kind: *kind,
            };
            for rec in query.filter(portfolio.recommendations()) {
                println!(
                    "[{}] {} ({:?} impact, {:?} effort, {:.0})",
                    rec.id, rec.title, rec.impact, rec.effort, rec.potential_savings
                );
                println!("    {}", rec.description);
            }
            print_insights(&portfolio);
        }
        Commands::Alerts { urgency, kind } => {
            let query = AdvisoryQuery {
                urgency: *urgency,
                kind: *kind,
            };
            for alert in query.filter(portfolio.alerts()) {
                println!(
                    "[{}] {} {} ({})",
                    alert.urgency.as_str(),
                    alert.created_date,
                    alert.title,
                    alert.id
                );
                println!("    {}", alert.description);
                println!("    Impact: {}", alert.impact_assessment);
                println!("    Action: {}", alert.recommended_action);
            }
            print_insights(&portfolio);
        }
        Commands::Forecast { route, start } => {
            let forecast = match start {
                Some(date) => forecast_route(route, *date, &SeedSource::new(portfolio.seed())),
                None => portfolio.forecast(route),
            };
            if forecast.lookup == Lookup::Fallback {
                println!("No baseline for {}; showing the LON-PAR profile.", route);
            }

            println!("Forecast for {} after {}", forecast.route_id, forecast.as_of);
            for horizon in forecast.horizons() {
                println!(
                    "  {:>2} days: {:>10.0} passengers, {:>14.0} revenue, {:>5.1}% load, {:.0}% confidence",
                    horizon.days,
                    horizon.passengers,
                    horizon.revenue,
                    horizon.avg_load_factor,
                    horizon.confidence
                );
            }

            let (risk, _) = risk_profile(route);
            println!(
                "Risk: {:?} overall ({}), volatility {:?}, competition {:?}, seasonality {:?}",
                risk.overall_risk,
                risk.risk_score,
                risk.volatility,
                risk.competition_intensity,
                risk.seasonal_impact
            );
        }
        Commands::Export { dir } => {
            let forecasts: Vec<_> = baseline_routes().map(|id| portfolio.forecast(id)).collect();
            let written = export_all(
                dir,
                &ExportSet {
                    performance: portfolio.performance(),
                    scores: portfolio.scores(),
                    recommendations: portfolio.recommendations(),
                    alerts: portfolio.alerts(),
                    insights: portfolio.insights(),
                    forecasts: &forecasts,
                },
            )?;
            for path in written {
                println!("{}", path.display());
            }
        }
        Commands::Config { .. } => {}
    }

    Ok(())
}
