use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Prayers shown on the schedule, in display order.
pub const DAILY_PRAYERS: [&str; 5] = ["Fajr", "Dhuhr", "Asr", "Maghrib", "Isha"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub country: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrayerSchedule {
    /// Every named time the source returned (Imsak, Sunrise, Midnight, ...).
    pub timings: BTreeMap<String, String>,
    pub date_readable: String,
    pub hijri_date: Option<String>,
    pub timezone: String,
    pub method: Option<String>,
}

impl PrayerSchedule {
    pub fn time_of(&self, prayer: &str) -> Option<&str> {
        self.timings.get(prayer).map(String::as_str)
    }

    pub fn daily(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        DAILY_PRAYERS.iter().map(|name| (*name, self.time_of(name)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QiblaBearing {
    pub coordinates: Coordinates,
    /// Degrees clockwise from true north.
    pub direction: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validity() {
        assert!(Coordinates::new(-6.2088, 106.8456).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, f64::NAN).is_valid());
    }

    #[test]
    fn test_daily_prayers_in_order() {
        let mut schedule = PrayerSchedule::default();
        schedule.timings.insert("Isha".into(), "19:02".into());
        schedule.timings.insert("Fajr".into(), "04:31".into());
        schedule.timings.insert("Sunrise".into(), "05:48".into());

        let daily: Vec<_> = schedule.daily().collect();
        assert_eq!(daily.len(), 5);
        assert_eq!(daily[0], ("Fajr", Some("04:31")));
        assert_eq!(daily[1], ("Dhuhr", None));
        assert_eq!(daily[4], ("Isha", Some("19:02")));
    }
}
