//! Real Las Vegas / Henderson locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap via Overpass API.

use meet_halfway::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng).expect("fixture coordinate in range")
    }
}

// Party start points
pub const WYNN: Location = Location::new("Wynn Las Vegas", 36.1263781, -115.1658180);
pub const MGM_GRAND: Location = Location::new("MGM Grand", 36.1023654, -115.1688720);
pub const LONGHORN: Location = Location::new("Longhorn Casino", 36.1070664, -115.0591256);

// ============================================================================
// Las Vegas Strip Area Restaurants
// ============================================================================

pub const STRIP_RESTAURANTS: &[Location] = &[
    Location::new("Hard Rock Cafe", 36.1041592, -115.1722166),
    Location::new("Public House", 36.1219193, -115.1689317),
    Location::new("Brooklyn Bowl", 36.1175388, -115.1695094),
    Location::new("Gordon Ramsay BurGR", 36.1107195, -115.1720818),
    Location::new("Spago by Wolfgang Puck", 36.1139368, -115.1741462),
    Location::new("Hash House A Go Go", 36.1181377, -115.1710989),
];

// ============================================================================
// Henderson / far east side
// ============================================================================

pub const HENDERSON: &[Location] = &[
    Location::new("I Love Sushi Henderson", 35.9916660, -115.1028343),
    Location::new("Extended Stay America Henderson", 36.1283949, -115.0826989),
    Location::new("Islander's Grill", 36.0335058, -114.9856162),
];
