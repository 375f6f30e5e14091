// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Daily per-route performance synthesis.
//!
//! Each route gets one record per calendar day of the configured window.
//! Demand is the product of a tier base load factor, a seasonal and a
//! day-of-week multiplier, uniform noise and a slow trend over the window.
//! Revenue and the eleven cost lines are derived from the resulting
//! passenger count.

use crate::catalog::{Catalog, MarketSize, RouteMaster};
use crate::config::PipelineConfig;
use crate::rng::{SeedSource, Stage};
use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

const MIN_LOAD_FACTOR: f64 = 0.25;
const MAX_LOAD_FACTOR: f64 = 0.95;
const CANCELLATION_PROBABILITY: f64 = 0.02;
const TURNAROUND_HOURS: f64 = 0.5;

/// Demand profile a route is synthesized with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteTier {
    HighProfit,
    Moderate,
    LossMaking,
}

impl RouteTier {
    pub fn of(route_id: &str, config: &PipelineConfig) -> Self {
        if config.high_profit_routes.iter().any(|id| id == route_id) {
            RouteTier::HighProfit
        } else if config.loss_making_routes.iter().any(|id| id == route_id) {
            RouteTier::LossMaking
        } else {
            RouteTier::Moderate
        }
    }

    pub fn base_load_factor(self) -> f64 {
        match self {
            RouteTier::HighProfit => 0.78,
            RouteTier::Moderate => 0.65,
            RouteTier::LossMaking => 0.42,
        }
    }

    /// Revenue per passenger-km.
    pub fn base_yield(self) -> f64 {
        match self {
            RouteTier::HighProfit => 0.15,
            RouteTier::Moderate => 0.12,
            RouteTier::LossMaking => 0.08,
        }
    }

    pub fn on_time_probability(self) -> f64 {
        match self {
            RouteTier::HighProfit => 0.85,
            RouteTier::Moderate => 0.79,
            RouteTier::LossMaking => 0.72,
        }
    }

    /// Long-run demand drift at `index` of `len` days. Loss routes decay
    /// towards 0.7x, everything else grows towards 1.1x.
    pub fn trend_factor(self, index: usize, len: usize) -> f64 {
        let progress = if len == 0 {
            0.0
        } else {
            index as f64 / len as f64
        };
        match self {
            RouteTier::LossMaking => (1.0 - progress * 0.3).max(0.7),
            _ => 1.0 + progress * 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandPattern {
    Business,
    Leisure,
}

const BUSINESS_CITIES: [&str; 3] = ["London", "Paris", "New York"];

// Sunday first.
const BUSINESS_DAY_MULTIPLIERS: [f64; 7] = [1.0, 1.1, 0.9, 0.9, 1.1, 1.3, 0.7];
const LEISURE_DAY_MULTIPLIERS: [f64; 7] = [1.2, 0.8, 0.8, 0.8, 1.0, 1.3, 1.4];

impl DemandPattern {
    pub fn of(route: &RouteMaster) -> Self {
        let business_city = BUSINESS_CITIES
            .iter()
            .any(|city| route.route_name.contains(city));
        if route.market_size == MarketSize::Large && business_city {
            DemandPattern::Business
        } else {
            DemandPattern::Leisure
        }
    }

    /// Business demand dips in June-August, leisure demand surges.
    pub fn seasonal_multiplier(self, date: NaiveDate) -> f64 {
        let summer = (6..=8).contains(&date.month());
        match (self, summer) {
            (DemandPattern::Business, true) => 0.9,
            (DemandPattern::Business, false) => 1.1,
            (DemandPattern::Leisure, true) => 1.4,
            (DemandPattern::Leisure, false) => 0.6,
        }
    }

    pub fn day_of_week_multiplier(self, date: NaiveDate) -> f64 {
        let day = date.weekday().num_days_from_sunday() as usize;
        match self {
            DemandPattern::Business => BUSINESS_DAY_MULTIPLIERS[day],
            DemandPattern::Leisure => LEISURE_DAY_MULTIPLIERS[day],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AircraftType {
    A321,
    A320,
    A319,
}

impl AircraftType {
    pub fn for_seats(seats: u32) -> Self {
        if seats >= 180 {
            AircraftType::A321
        } else if seats >= 150 {
            AircraftType::A320
        } else {
            AircraftType::A319
        }
    }
}

/// One flight of one route on one day. Money fields are whole currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePerformance {
    pub date: NaiveDate,
    pub route_id: String,
    pub flight_number: String,
    pub seats_available: u32,
    pub passengers_booked: u32,
    /// Whole percent, 25..=95.
    pub load_factor: f64,
    pub revenue_base_fare: f64,
    pub revenue_ancillary: f64,
    pub revenue_cargo: f64,
    pub revenue_other: f64,
    pub revenue_total: f64,
    pub cost_fuel: f64,
    pub cost_crew: f64,
    pub cost_airport: f64,
    pub cost_ground_handling: f64,
    pub cost_maintenance: f64,
    pub cost_catering: f64,
    pub cost_navigation: f64,
    pub cost_insurance: f64,
    pub cost_aircraft_ownership: f64,
    pub cost_marketing: f64,
    pub cost_overhead: f64,
    pub cost_total: f64,
    pub gross_profit: f64,
    pub operating_profit: f64,
    pub net_profit: f64,
    pub profit_margin: f64,
    pub on_time_departure: bool,
    pub delay_minutes: u32,
    pub cancelled: bool,
    pub aircraft_type: AircraftType,
    pub block_hours: f64,
}

impl RoutePerformance {
    pub fn revenue_components(&self) -> [f64; 4] {
        [
            self.revenue_base_fare,
            self.revenue_ancillary,
            self.revenue_cargo,
            self.revenue_other,
        ]
    }

    pub fn cost_components(&self) -> [f64; 11] {
        [
            self.cost_fuel,
            self.cost_crew,
            self.cost_airport,
            self.cost_ground_handling,
            self.cost_maintenance,
            self.cost_catering,
            self.cost_navigation,
            self.cost_insurance,
            self.cost_aircraft_ownership,
            self.cost_marketing,
            self.cost_overhead,
        ]
    }
}

/// Net profit as a percentage of revenue; zero revenue gives a zero margin.
pub fn profit_margin(net_profit: f64, revenue: f64) -> f64 {
    if revenue == 0.0 {
        0.0
    } else {
        net_profit / revenue * 100.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Every date from `start` to `end`, both included.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

struct Costs {
    fuel: f64,
    crew: f64,
    airport: f64,
    ground_handling: f64,
    maintenance: f64,
    catering: f64,
    navigation: f64,
    insurance: f64,
    aircraft_ownership: f64,
    marketing: f64,
    overhead: f64,
}

impl Costs {
    fn compute(route: &RouteMaster, passengers: f64, revenue: f64) -> Self {
        let km = route.distance_km as f64;
        Self {
            fuel: km * 0.45 * passengers * 0.7,
            crew: route.flight_time_mins as f64 * 15.0 + passengers * 2.0,
            airport: 2500.0 + passengers * 8.0,
            ground_handling: 1200.0 + passengers * 3.0,
            maintenance: km * 0.12 + passengers * 1.5,
            catering: passengers * 4.5,
            navigation: km * 0.08,
            insurance: revenue * 0.005,
            aircraft_ownership: km * 0.35,
            marketing: revenue * 0.03,
            overhead: revenue * 0.08,
        }
    }

    fn total(&self) -> f64 {
        self.fuel
            + self.crew
            + self.airport
            + self.ground_handling
            + self.maintenance
            + self.catering
            + self.navigation
            + self.insurance
            + self.aircraft_ownership
            + self.marketing
            + self.overhead
    }
}

/// Synthesizes one record per entry of `dates` for a single route.
pub fn synthesize_route<R: Rng>(
    route: &RouteMaster,
    dates: &[NaiveDate],
    config: &PipelineConfig,
    rng: &mut R,
) -> Vec<RoutePerformance> {
    let tier = RouteTier::of(&route.route_id, config);
    let pattern = DemandPattern::of(route);
    let seats = route.market_size.seats();
    let aircraft_type = AircraftType::for_seats(seats);
    let block_hours = round2(route.flight_time_mins as f64 / 60.0 + TURNAROUND_HOURS);

    dates
        .iter()
        .enumerate()
        .map(|(index, &date)| {
            let random_factor = rng.gen_range(0.8..1.2);
            let load_factor = (tier.base_load_factor()
                * pattern.seasonal_multiplier(date)
                * pattern.day_of_week_multiplier(date)
                * random_factor
                * tier.trend_factor(index, dates.len()))
            .clamp(MIN_LOAD_FACTOR, MAX_LOAD_FACTOR);
            let passengers = (seats as f64 * load_factor).round();

            let base_fare = passengers
                * route.distance_km as f64
                * tier.base_yield()
                * rng.gen_range(0.9..1.1);
            let ancillary = base_fare * 0.08;
            let cargo = base_fare * 0.03;
            let other = base_fare * 0.02;
            let revenue = base_fare + ancillary + cargo + other;

            let costs = Costs::compute(route, passengers, revenue);
            let cost_total = costs.total();

            let gross_profit =
                revenue - (costs.fuel + costs.crew + costs.catering + costs.ground_handling);
            let net_profit = revenue - cost_total;
            let operating_profit = net_profit + costs.overhead;

            let on_time = rng.gen_bool(tier.on_time_probability());
            let delay_minutes = if on_time {
                0
            } else {
                rng.gen_range(5.0..50.0_f64).round() as u32
            };
            let cancelled = rng.gen_bool(CANCELLATION_PROBABILITY);
            let flight_number = format!("AB{}", rng.gen_range(100..1000));

            RoutePerformance {
                date,
                route_id: route.route_id.clone(),
                flight_number,
                seats_available: seats,
                passengers_booked: passengers as u32,
                load_factor: (load_factor * 100.0).round(),
                revenue_base_fare: base_fare.round(),
                revenue_ancillary: ancillary.round(),
                revenue_cargo: cargo.round(),
                revenue_other: other.round(),
                revenue_total: revenue.round(),
                cost_fuel: costs.fuel.round(),
                cost_crew: costs.crew.round(),
                cost_airport: costs.airport.round(),
                cost_ground_handling: costs.ground_handling.round(),
                cost_maintenance: costs.maintenance.round(),
                cost_catering: costs.catering.round(),
                cost_navigation: costs.navigation.round(),
                cost_insurance: costs.insurance.round(),
                cost_aircraft_ownership: costs.aircraft_ownership.round(),
                cost_marketing: costs.marketing.round(),
                cost_overhead: costs.overhead.round(),
                cost_total: cost_total.round(),
                gross_profit: gross_profit.round(),
                operating_profit: operating_profit.round(),
                net_profit: net_profit.round(),
                profit_margin: round2(profit_margin(net_profit, revenue)),
                on_time_departure: on_time,
                delay_minutes,
                cancelled,
                aircraft_type,
                block_hours,
            }
        })
        .collect()
}

/// Synthesizes the full performance table, route-major in catalog order.
///
/// Routes are processed in parallel; each draws from its own stream of
/// `seeds`, so the output only depends on the seed and the inputs.
pub fn generate_performance(
    catalog: &Catalog,
    config: &PipelineConfig,
    seeds: &SeedSource,
) -> Vec<RoutePerformance> {
    let dates = date_range(config.start_date, config.end_date);

    let per_route: Vec<Vec<RoutePerformance>> = catalog
        .routes()
        .par_iter()
        .enumerate()
        .map(|(index, route)| {
            let mut rng = seeds.stream(Stage::Synthesis, index as u64);
            synthesize_route(route, &dates, config, &mut rng)
        })
        .collect();

    let records: Vec<RoutePerformance> = per_route.into_iter().flatten().collect();
    log::debug!(
        "Synthesized {} records ({} routes x {} days)",
        records.len(),
        catalog.len(),
        dates.len()
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let dates = date_range(ymd(2022, 1, 1), ymd(2024, 12, 31));
        assert_eq!(dates.len(), 1096);
        assert_eq!(dates[0], ymd(2022, 1, 1));
        assert_eq!(*dates.last().unwrap(), ymd(2024, 12, 31));

        assert!(date_range(ymd(2024, 1, 2), ymd(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_tier_membership() {
        let config = PipelineConfig::default();
        assert_eq!(RouteTier::of("LON-PAR", &config), RouteTier::HighProfit);
        assert_eq!(RouteTier::of("BRS-PRG", &config), RouteTier::LossMaking);
        assert_eq!(RouteTier::of("MAN-DUB", &config), RouteTier::Moderate);
    }

    #[test]
    fn test_trend_factor() {
        assert_eq!(RouteTier::Moderate.trend_factor(0, 100), 1.0);
        assert!((RouteTier::HighProfit.trend_factor(50, 100) - 1.05).abs() < 1e-12);
        assert!((RouteTier::LossMaking.trend_factor(50, 100) - 0.85).abs() < 1e-12);
        // Loss-route decay bottoms out at 0.7x.
        assert_eq!(RouteTier::LossMaking.trend_factor(100, 100), 0.7);
    }

    #[test]
    fn test_demand_pattern() {
        let catalog = Catalog::builtin();
        let pattern = |id: &str| DemandPattern::of(catalog.get(id).unwrap());

        assert_eq!(pattern("LON-PAR"), DemandPattern::Business);
        assert_eq!(pattern("DUB-LON"), DemandPattern::Business);
        assert_eq!(pattern("MIA-NYC"), DemandPattern::Business);
        // Large market but no business city in the name.
        assert_eq!(pattern("MAD-BCN"), DemandPattern::Leisure);
        // Medium market.
        assert_eq!(pattern("ZUR-VIE"), DemandPattern::Leisure);
    }

    #[test]
    fn test_seasonal_and_weekday_multipliers() {
        let july = ymd(2023, 7, 15);
        let january = ymd(2023, 1, 15);
        assert_eq!(DemandPattern::Business.seasonal_multiplier(july), 0.9);
        assert_eq!(DemandPattern::Business.seasonal_multiplier(january), 1.1);
        assert_eq!(DemandPattern::Leisure.seasonal_multiplier(july), 1.4);
        assert_eq!(DemandPattern::Leisure.seasonal_multiplier(january), 0.6);

        let sunday = ymd(2024, 1, 7);
        let friday = ymd(2024, 1, 5);
        let saturday = ymd(2024, 1, 6);
        assert_eq!(DemandPattern::Business.day_of_week_multiplier(sunday), 1.0);
        assert_eq!(DemandPattern::Business.day_of_week_multiplier(friday), 1.3);
        assert_eq!(DemandPattern::Business.day_of_week_multiplier(saturday), 0.7);
        assert_eq!(DemandPattern::Leisure.day_of_week_multiplier(saturday), 1.4);
    }

    #[test]
    fn test_profit_margin_guards_zero_revenue() {
        assert_eq!(profit_margin(-500.0, 0.0), 0.0);
        assert_eq!(profit_margin(25.0, 100.0), 25.0);
    }

    #[test]
    fn test_aircraft_by_seats() {
        assert_eq!(AircraftType::for_seats(180), AircraftType::A321);
        assert_eq!(AircraftType::for_seats(150), AircraftType::A320);
        assert_eq!(AircraftType::for_seats(120), AircraftType::A319);
    }

    #[test]
    fn test_synthesize_route_records() {
        let config = PipelineConfig::default();
        let route = Catalog::builtin().get("LON-NYC").unwrap();
        let dates = date_range(ymd(2024, 1, 1), ymd(2024, 3, 31));
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let records = synthesize_route(route, &dates, &config, &mut rng);
        assert_eq!(records.len(), dates.len());

        for record in &records {
            assert_eq!(record.route_id, "LON-NYC");
            assert_eq!(record.seats_available, 180);
            assert_eq!(record.aircraft_type, AircraftType::A321);
            assert_eq!(record.block_hours, 8.5);
            assert!((25.0..=95.0).contains(&record.load_factor));
            assert!(record.passengers_booked >= 45);
            assert!(record.flight_number.starts_with("AB"));
            assert_eq!(record.flight_number.len(), 5);
            if record.on_time_departure {
                assert_eq!(record.delay_minutes, 0);
            } else {
                assert!((5..=50).contains(&record.delay_minutes));
            }
        }
    }
}
