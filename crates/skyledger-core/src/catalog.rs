// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! The static route network.

use crate::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteType {
    Domestic,
    International,
    Regional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarketSize {
    Large,
    Medium,
    Small,
}

impl MarketSize {
    /// Seat count of the aircraft deployed on a market of this size.
    pub fn seats(self) -> u32 {
        match self {
            MarketSize::Large => 180,
            MarketSize::Medium => 150,
            MarketSize::Small => 120,
        }
    }

    /// Tier value used by the strategic sub-score.
    pub fn tier_value(self) -> f64 {
        match self {
            MarketSize::Large => 100.0,
            MarketSize::Medium => 70.0,
            MarketSize::Small => 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HubClassification {
    #[serde(rename = "Hub-Hub")]
    HubHub,
    #[serde(rename = "Hub-Spoke")]
    HubSpoke,
    #[serde(rename = "Spoke-Hub")]
    SpokeHub,
    #[serde(rename = "Spoke-Spoke")]
    SpokeSpoke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategicImportance {
    High,
    Medium,
    Low,
}

impl StrategicImportance {
    pub fn tier_value(self) -> f64 {
        match self {
            StrategicImportance::High => 100.0,
            StrategicImportance::Medium => 70.0,
            StrategicImportance::Low => 40.0,
        }
    }
}

macro_rules! display_as_serde_name {
    ($($ty:ty => { $($variant:path => $name:literal),+ $(,)? }),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let name = match self {
                        $($variant => $name),+
                    };
                    f.pad(name)
                }
            }
        )+
    };
}

display_as_serde_name! {
    RouteType => {
        RouteType::Domestic => "Domestic",
        RouteType::International => "International",
        RouteType::Regional => "Regional",
    },
    MarketSize => {
        MarketSize::Large => "Large",
        MarketSize::Medium => "Medium",
        MarketSize::Small => "Small",
    },
    HubClassification => {
        HubClassification::HubHub => "Hub-Hub",
        HubClassification::HubSpoke => "Hub-Spoke",
        HubClassification::SpokeHub => "Spoke-Hub",
        HubClassification::SpokeSpoke => "Spoke-Spoke",
    },
    StrategicImportance => {
        StrategicImportance::High => "High",
        StrategicImportance::Medium => "Medium",
        StrategicImportance::Low => "Low",
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMaster {
    pub route_id: String,
    pub origin_airport: String,
    pub destination_airport: String,
    pub route_name: String,
    pub distance_km: u32,
    pub flight_time_mins: u32,
    pub route_type: RouteType,
    pub market_size: MarketSize,
    pub hub_classification: HubClassification,
    pub strategic_importance: StrategicImportance,
    pub years_operating: u32,
    pub slot_restricted: bool,
}

type RouteRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    u32,
    u32,
    RouteType,
    MarketSize,
    HubClassification,
    StrategicImportance,
    u32,
    bool,
);

// High-profit block first, then moderate, then loss-making routes.
#[rustfmt::skip]
static ROUTE_TABLE: [RouteRow; 50] = [
    ("LON-PAR", "LHR", "CDG", "London-Paris", 344, 85, RouteType::International, MarketSize::Large, HubClassification::HubHub, StrategicImportance::High, 8, true),
    ("LON-NYC", "LHR", "JFK", "London-New York", 5585, 480, RouteType::International, MarketSize::Large, HubClassification::HubHub, StrategicImportance::High, 12, true),
    ("PAR-ROM", "CDG", "FCO", "Paris-Rome", 1105, 140, RouteType::International, MarketSize::Large, HubClassification::HubHub, StrategicImportance::High, 10, false),
    ("MAD-BCN", "MAD", "BCN", "Madrid-Barcelona", 483, 75, RouteType::Domestic, MarketSize::Large, HubClassification::HubSpoke, StrategicImportance::High, 15, false),
    ("FRA-MUC", "FRA", "MUC", "Frankfurt-Munich", 230, 65, RouteType::Domestic, MarketSize::Large, HubClassification::HubSpoke, StrategicImportance::High, 18, false),
    ("AMS-BCN", "AMS", "BCN", "Amsterdam-Barcelona", 1243, 125, RouteType::International, MarketSize::Large, HubClassification::HubSpoke, StrategicImportance::High, 9, false),
    ("DUB-LON", "DUB", "LHR", "Dublin-London", 463, 85, RouteType::International, MarketSize::Large, HubClassification::SpokeHub, StrategicImportance::High, 14, true),
    ("ZUR-VIE", "ZUR", "VIE", "Zurich-Vienna", 596, 95, RouteType::International, MarketSize::Medium, HubClassification::HubSpoke, StrategicImportance::Medium, 7, false),
    ("CPH-OSL", "CPH", "OSL", "Copenhagen-Oslo", 483, 75, RouteType::International, MarketSize::Medium, HubClassification::HubHub, StrategicImportance::Medium, 11, false),
    ("STO-HEL", "ARN", "HEL", "Stockholm-Helsinki", 396, 70, RouteType::International, MarketSize::Medium, HubClassification::HubHub, StrategicImportance::Medium, 8, false),
    ("MIA-NYC", "MIA", "JFK", "Miami-New York", 1761, 180, RouteType::Domestic, MarketSize::Large, HubClassification::HubHub, StrategicImportance::High, 6, true),
    ("LAX-LAS", "LAX", "LAS", "Los Angeles-Las Vegas", 379, 65, RouteType::Domestic, MarketSize::Large, HubClassification::HubSpoke, StrategicImportance::Medium, 13, false),
    ("SFO-SEA", "SFO", "SEA", "San Francisco-Seattle", 1093, 125, RouteType::Domestic, MarketSize::Large, HubClassification::HubHub, StrategicImportance::High, 9, true),
    ("ORD-DEN", "ORD", "DEN", "Chicago-Denver", 1474, 155, RouteType::Domestic, MarketSize::Large, HubClassification::HubHub, StrategicImportance::High, 11, false),
    ("ATL-MIA", "ATL", "MIA", "Atlanta-Miami", 973, 115, RouteType::Domestic, MarketSize::Large, HubClassification::HubHub, StrategicImportance::High, 14, false),
    ("MAN-DUB", "MAN", "DUB", "Manchester-Dublin", 290, 65, RouteType::International, MarketSize::Medium, HubClassification::SpokeSpoke, StrategicImportance::Medium, 6, false),
    ("EDI-AMS", "EDI", "AMS", "Edinburgh-Amsterdam", 565, 90, RouteType::International, MarketSize::Medium, HubClassification::SpokeHub, StrategicImportance::Medium, 5, false),
    ("BER-WAW", "BER", "WAW", "Berlin-Warsaw", 516, 85, RouteType::International, MarketSize::Medium, HubClassification::HubHub, StrategicImportance::Medium, 4, false),
    ("MIL-NAP", "MXP", "NAP", "Milan-Naples", 658, 95, RouteType::Domestic, MarketSize::Medium, HubClassification::HubSpoke, StrategicImportance::Medium, 8, false),
    ("LIS-MAD", "LIS", "MAD", "Lisbon-Madrid", 502, 80, RouteType::International, MarketSize::Medium, HubClassification::HubHub, StrategicImportance::Medium, 7, false),
    ("GLA-BRU", "GLA", "BRU", "Glasgow-Brussels", 664, 95, RouteType::International, MarketSize::Medium, HubClassification::SpokeHub, StrategicImportance::Low, 3, false),
    ("BOL-MIL", "BLQ", "MXP", "Bologna-Milan", 201, 55, RouteType::Domestic, MarketSize::Small, HubClassification::SpokeHub, StrategicImportance::Low, 4, false),
    ("HAM-VIE", "HAM", "VIE", "Hamburg-Vienna", 779, 105, RouteType::International, MarketSize::Medium, HubClassification::SpokeHub, StrategicImportance::Medium, 5, false),
    ("BUD-PRG", "BUD", "PRG", "Budapest-Prague", 443, 75, RouteType::International, MarketSize::Medium, HubClassification::SpokeSpoke, StrategicImportance::Medium, 6, false),
    ("ATH-ROM", "ATH", "FCO", "Athens-Rome", 1054, 135, RouteType::International, MarketSize::Medium, HubClassification::HubHub, StrategicImportance::Medium, 9, false),
    ("DEN-PHX", "DEN", "PHX", "Denver-Phoenix", 957, 115, RouteType::Domestic, MarketSize::Medium, HubClassification::HubSpoke, StrategicImportance::Medium, 7, false),
    ("SEA-PDX", "SEA", "PDX", "Seattle-Portland", 233, 55, RouteType::Domestic, MarketSize::Medium, HubClassification::HubSpoke, StrategicImportance::Low, 8, false),
    ("BOS-BWI", "BOS", "BWI", "Boston-Baltimore", 634, 90, RouteType::Domestic, MarketSize::Medium, HubClassification::HubSpoke, StrategicImportance::Medium, 5, false),
    ("DTW-MSP", "DTW", "MSP", "Detroit-Minneapolis", 981, 115, RouteType::Domestic, MarketSize::Medium, HubClassification::HubHub, StrategicImportance::Medium, 10, false),
    ("IAH-DFW", "IAH", "DFW", "Houston-Dallas", 362, 65, RouteType::Domestic, MarketSize::Large, HubClassification::HubHub, StrategicImportance::High, 12, false),
    ("MCO-FLL", "MCO", "FLL", "Orlando-Fort Lauderdale", 298, 60, RouteType::Domestic, MarketSize::Medium, HubClassification::SpokeSpoke, StrategicImportance::Low, 6, false),
    ("PHX-SAN", "PHX", "SAN", "Phoenix-San Diego", 482, 75, RouteType::Domestic, MarketSize::Medium, HubClassification::SpokeSpoke, StrategicImportance::Medium, 9, false),
    ("STL-KCI", "STL", "MCI", "St. Louis-Kansas City", 383, 65, RouteType::Domestic, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 7, false),
    ("CLE-PIT", "CLE", "PIT", "Cleveland-Pittsburgh", 185, 50, RouteType::Domestic, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 5, false),
    ("MEM-BNA", "MEM", "BNA", "Memphis-Nashville", 300, 60, RouteType::Domestic, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 4, false),
    ("BRS-PRG", "BRS", "PRG", "Bristol-Prague", 1318, 165, RouteType::International, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 2, false),
    ("LDS-BUD", "LBA", "BUD", "Leeds-Budapest", 1465, 175, RouteType::International, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 1, false),
    ("NCL-RIG", "NCL", "RIX", "Newcastle-Riga", 1587, 185, RouteType::International, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 2, false),
    ("LPL-KRK", "LPL", "KRK", "Liverpool-Krakow", 1450, 175, RouteType::International, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 1, false),
    ("CDF-OSL", "CWL", "OSL", "Cardiff-Oslo", 1238, 155, RouteType::International, MarketSize::Small, HubClassification::SpokeHub, StrategicImportance::Low, 1, false),
    ("BOD-TLS", "BOD", "TLS", "Bordeaux-Toulouse", 245, 55, RouteType::Domestic, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 3, false),
    ("BLQ-CAG", "BLQ", "CAG", "Bologna-Cagliari", 789, 105, RouteType::Domestic, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 2, false),
    ("NTE-LYS", "NTE", "LYS", "Nantes-Lyon", 356, 65, RouteType::Domestic, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 2, false),
    ("HAJ-DUS", "HAJ", "DUS", "Hannover-Dusseldorf", 234, 55, RouteType::Domestic, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 1, false),
    ("NUE-STR", "NUE", "STR", "Nuremberg-Stuttgart", 145, 45, RouteType::Domestic, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 1, false),
    ("ABZ-INV", "ABZ", "INV", "Aberdeen-Inverness", 166, 45, RouteType::Domestic, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 2, false),
    ("SOU-EXE", "SOU", "EXT", "Southampton-Exeter", 134, 40, RouteType::Domestic, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 1, false),
    ("HUY-CVT", "HUY", "CVT", "Humberside-Coventry", 189, 50, RouteType::Domestic, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 1, false),
    ("BHD-CAX", "BHD", "CAX", "Belfast-Carlisle", 198, 50, RouteType::Domestic, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 1, false),
    ("PLY-NWI", "PLH", "NWI", "Plymouth-Norwich", 387, 65, RouteType::Domestic, MarketSize::Small, HubClassification::SpokeSpoke, StrategicImportance::Low, 1, false),
];

/// Read-only set of routes, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    routes: Vec<RouteMaster>,
}

impl Catalog {
    pub fn new(routes: Vec<RouteMaster>) -> Self {
        Self { routes }
    }

    /// The built-in 50-route network, built once per process.
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let routes = ROUTE_TABLE
                .iter()
                .map(
                    |&(id, origin, dest, name, km, mins, kind, size, hub, importance, years, slot)| {
                        RouteMaster {
                            route_id: id.to_string(),
                            origin_airport: origin.to_string(),
                            destination_airport: dest.to_string(),
                            route_name: name.to_string(),
                            distance_km: km,
                            flight_time_mins: mins,
                            route_type: kind,
                            market_size: size,
                            hub_classification: hub,
                            strategic_importance: importance,
                            years_operating: years,
                            slot_restricted: slot,
                        }
                    },
                )
                .collect();
            Catalog { routes }
        })
    }

    pub fn routes(&self) -> &[RouteMaster] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn find(&self, route_id: &str) -> Option<&RouteMaster> {
        self.routes.iter().find(|r| r.route_id == route_id)
    }

    pub fn get(&self, route_id: &str) -> Result<&RouteMaster, LedgerError> {
        self.find(route_id)
            .ok_or_else(|| LedgerError::UnknownRoute(route_id.to_string()))
    }

    pub fn contains(&self, route_id: &str) -> bool {
        self.find(route_id).is_some()
    }
}
