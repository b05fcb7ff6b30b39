use std::collections::BTreeMap;

use serde::Deserialize;

use crate::app::{Result, TilawaError};
use crate::domain::{Coordinates, PrayerSchedule, QiblaBearing};

#[derive(Debug, Default, Deserialize)]
struct RawHijri {
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDate {
    #[serde(default)]
    readable: String,
    #[serde(default)]
    hijri: Option<RawHijri>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMethod {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMeta {
    #[serde(default)]
    timezone: String,
    #[serde(default)]
    method: Option<RawMethod>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawTimings {
    timings: BTreeMap<String, String>,
    #[serde(default)]
    date: RawDate,
    #[serde(default)]
    meta: RawMeta,
}

impl RawTimings {
    pub(super) fn into_schedule(self) -> PrayerSchedule {
        PrayerSchedule {
            timings: self.timings,
            date_readable: self.date.readable,
            hijri_date: self.date.hijri.and_then(|h| h.date),
            timezone: self.meta.timezone,
            method: self.meta.method.and_then(|m| m.name),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RawQibla {
    latitude: f64,
    longitude: f64,
    direction: f64,
}

impl RawQibla {
    pub(super) fn into_bearing(self) -> Result<QiblaBearing> {
        if !self.direction.is_finite() {
            return Err(TilawaError::Other("qibla direction is not a number".into()));
        }
        Ok(QiblaBearing {
            coordinates: Coordinates::new(self.latitude, self.longitude),
            direction: self.direction.rem_euclid(360.0),
        })
    }
}
