//! Static city gazetteer.
//!
//! Maps a city name to a fixed latitude/longitude pair. Lookup is exact after
//! trimming and lower-casing; anything else falls back to the default city.
//! No fuzzy matching, no geocoding.

/// Display name of the fallback city.
pub const DEFAULT_CITY: &str = "Bangalore";

/// city (lower-cased) → (lat, lng)
static CITIES: &[(&str, (f64, f64))] = &[
    ("bangalore", (12.9716, 77.5946)),
    ("bengaluru", (12.9716, 77.5946)),
    ("mumbai", (19.0760, 72.8777)),
    ("delhi", (28.6139, 77.2090)),
    ("hyderabad", (17.3850, 78.4867)),
    ("chennai", (13.0827, 80.2707)),
    ("pune", (18.5204, 73.8567)),
    ("kolkata", (22.5726, 88.3639)),
    ("ahmedabad", (23.0225, 72.5714)),
    ("jaipur", (26.9124, 75.7873)),
    ("kochi", (9.9312, 76.2673)),
    ("nairobi", (-1.2921, 36.8219)),
    ("lagos", (6.5244, 3.3792)),
    ("accra", (5.6037, -0.1870)),
    ("kampala", (0.3476, 32.5825)),
    ("kigali", (-1.9441, 30.0619)),
];

/// Coordinates for a city name, falling back to [`DEFAULT_CITY`] on a miss.
pub fn coordinates_for(city: &str) -> (f64, f64) {
    let needle = city.trim().to_lowercase();
    CITIES
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, coords)| *coords)
        .unwrap_or_else(default_coordinates)
}

/// Coordinates of the fallback city.
pub fn default_coordinates() -> (f64, f64) {
    (12.9716, 77.5946)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_city_is_case_insensitive() {
        assert_eq!(coordinates_for("DELHI"), (28.6139, 77.2090));
        assert_eq!(coordinates_for("delhi"), (28.6139, 77.2090));
        assert_eq!(coordinates_for("  Nairobi  "), (-1.2921, 36.8219));
    }

    #[test]
    fn unknown_city_falls_back_to_default() {
        assert_eq!(coordinates_for("Atlantis"), default_coordinates());
        assert_eq!(coordinates_for(""), default_coordinates());
    }

    #[test]
    fn bengaluru_alias_matches_bangalore() {
        assert_eq!(coordinates_for("Bengaluru"), coordinates_for("Bangalore"));
    }
}
