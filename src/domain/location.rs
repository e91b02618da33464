// Location domain model
use super::reading::Reading;
use chrono::FixedOffset;

#[derive(Debug, Clone)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub resolved_address: String,
    pub timezone: String,
    pub utc_offset: FixedOffset,
}

impl Location {
    pub fn new(id: String, resolved_address: String, timezone: String, utc_offset: FixedOffset) -> Self {
        let name = Self::format_name(&id);
        Self {
            id,
            name,
            resolved_address,
            timezone,
            utc_offset,
        }
    }

    fn format_name(id: &str) -> String {
        // "Dolores_Park_" -> "Dolores Park"
        id.trim_end_matches('_').replace('_', " ")
    }
}

/// Every reading known for a location, sorted ascending by timestamp.
#[derive(Debug, Clone)]
pub struct LocationReadings {
    pub location: Location,
    pub readings: Vec<Reading>,
}

impl LocationReadings {
    pub fn new(location: Location, mut readings: Vec<Reading>) -> Self {
        readings.sort_by_key(|r| r.timestamp);
        Self { location, readings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_format_name() {
        let location = Location::new("Dolores_Park_".to_string(), String::new(), "UTC".to_string(), utc());
        assert_eq!(location.name, "Dolores Park");

        let location = Location::new("46220".to_string(), String::new(), "UTC".to_string(), utc());
        assert_eq!(location.name, "46220");
    }

    #[test]
    fn test_readings_are_sorted_on_construction() {
        let location = Location::new("here".to_string(), String::new(), "UTC".to_string(), utc());
        let set = LocationReadings::new(
            location,
            vec![Reading::at(7200), Reading::at(0), Reading::at(3600)],
        );

        let stamps: Vec<i64> = set.readings.iter().map(|r| r.timestamp).collect();
        assert_eq!(stamps, vec![0, 3600, 7200]);
    }
}
