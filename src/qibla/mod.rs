//! Qibla needle model.
//!
//! A bearing fetched once per location plus a live device heading give the
//! rotation of the needle. Either input may be missing; the compass then
//! reports the neutral value instead of failing.

pub mod heading;

use tokio::sync::watch;
use tracing::debug;

pub use heading::{HeadingReading, HeadingSource, HeadingSubscription, LineHeadingSource};

/// `(bearing - heading) mod 360`, normalized to `[0, 360)`.
pub fn compute_needle_rotation(qibla_bearing_deg: f64, device_heading_deg: f64) -> f64 {
    let rotation = (qibla_bearing_deg - device_heading_deg).rem_euclid(360.0);
    // rem_euclid rounds tiny negative remainders up to exactly 360.0
    if rotation >= 360.0 {
        0.0
    } else {
        rotation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompassStatus {
    pub bearing_known: bool,
    pub heading_available: bool,
}

pub struct QiblaCompass {
    bearing: Option<f64>,
    heading: Option<f64>,
    rotation_tx: watch::Sender<f64>,
}

impl Default for QiblaCompass {
    fn default() -> Self {
        Self::new()
    }
}

impl QiblaCompass {
    pub fn new() -> Self {
        let (rotation_tx, _) = watch::channel(0.0);
        Self {
            bearing: None,
            heading: None,
            rotation_tx,
        }
    }

    pub fn with_bearing(bearing: f64) -> Self {
        let mut compass = Self::new();
        compass.set_bearing(bearing);
        compass
    }

    pub fn set_bearing(&mut self, bearing: f64) {
        self.bearing = bearing.is_finite().then(|| bearing.rem_euclid(360.0));
        self.publish();
    }

    pub fn bearing(&self) -> Option<f64> {
        self.bearing
    }

    pub fn heading(&self) -> Option<f64> {
        self.heading
    }

    /// Applies one sensor reading. A reading without a usable value keeps the
    /// last known heading.
    pub fn apply(&mut self, reading: &HeadingReading) -> f64 {
        if let Some(heading) = reading.heading() {
            self.heading = Some(heading);
            self.publish();
        }
        self.rotation()
    }

    /// Zero until a bearing is known; a missing heading counts as facing north.
    pub fn rotation(&self) -> f64 {
        match self.bearing {
            Some(bearing) => compute_needle_rotation(bearing, self.heading.unwrap_or(0.0)),
            None => 0.0,
        }
    }

    pub fn status(&self) -> CompassStatus {
        CompassStatus {
            bearing_known: self.bearing.is_some(),
            heading_available: self.heading.is_some(),
        }
    }

    /// Latest-value view of the rotation; intermediate values are never queued.
    pub fn watch(&self) -> watch::Receiver<f64> {
        self.rotation_tx.subscribe()
    }

    /// Drains the subscription until it ends, calling `on_update` after every
    /// reading that carried a heading.
    pub async fn follow<F>(&mut self, subscription: &mut HeadingSubscription, mut on_update: F)
    where
        F: FnMut(f64, CompassStatus),
    {
        while let Some(reading) = subscription.next().await {
            if reading.heading().is_none() {
                debug!("Ignoring heading reading without a value");
                continue;
            }
            let rotation = self.apply(&reading);
            on_update(rotation, self.status());
        }
    }

    fn publish(&self) {
        self.rotation_tx.send_replace(self.rotation());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(alpha: f64) -> HeadingReading {
        HeadingReading {
            alpha: Some(alpha),
            compass_heading: None,
        }
    }

    #[test]
    fn test_rotation_facing_north() {
        assert_eq!(compute_needle_rotation(295.0, 0.0), 295.0);
        assert_eq!(compute_needle_rotation(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_rotation_wraps_around() {
        assert_eq!(compute_needle_rotation(10.0, 350.0), 20.0);
        assert_eq!(compute_needle_rotation(295.0, 270.0), 25.0);
    }

    #[test]
    fn test_rotation_ignores_full_turns() {
        for (bearing, heading) in [(295.0, 12.5), (10.0, 350.0), (0.0, 0.0), (180.0, 90.0)] {
            let base = compute_needle_rotation(bearing, heading);
            assert!((compute_needle_rotation(bearing + 360.0, heading) - base).abs() < 1e-9);
            assert!((compute_needle_rotation(bearing, heading + 360.0) - base).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rotation_stays_in_range() {
        for bearing in [0.0, 1e-15, 359.999, 720.0, -30.0] {
            for heading in [0.0, 1e-15, 359.999, -720.5] {
                let r = compute_needle_rotation(bearing, heading);
                assert!((0.0..360.0).contains(&r), "{bearing} {heading} -> {r}");
            }
        }
    }

    #[test]
    fn test_neutral_without_bearing() {
        let mut compass = QiblaCompass::new();
        assert_eq!(compass.rotation(), 0.0);
        compass.apply(&reading(90.0));
        assert_eq!(compass.rotation(), 0.0);
        assert_eq!(
            compass.status(),
            CompassStatus {
                bearing_known: false,
                heading_available: true,
            }
        );
    }

    #[test]
    fn test_bearing_without_heading_faces_north() {
        let compass = QiblaCompass::with_bearing(295.0);
        assert_eq!(compass.rotation(), 295.0);
        assert_eq!(
            compass.status(),
            CompassStatus {
                bearing_known: true,
                heading_available: false,
            }
        );
    }

    #[test]
    fn test_latest_reading_wins() {
        let mut compass = QiblaCompass::with_bearing(295.0);
        let rx = compass.watch();

        compass.apply(&reading(10.0));
        compass.apply(&reading(270.0));

        assert_eq!(*rx.borrow(), 25.0);
        assert_eq!(compass.rotation(), 25.0);
    }

    #[test]
    fn test_empty_reading_keeps_previous_heading() {
        let mut compass = QiblaCompass::with_bearing(100.0);
        compass.apply(&reading(40.0));
        let rotation = compass.apply(&HeadingReading::default());
        assert_eq!(rotation, 60.0);
        assert_eq!(compass.heading(), Some(40.0));
    }

    #[test]
    fn test_non_finite_bearing_is_unknown() {
        let mut compass = QiblaCompass::with_bearing(100.0);
        compass.set_bearing(f64::NAN);
        assert!(!compass.status().bearing_known);
        assert_eq!(compass.rotation(), 0.0);
    }

    #[tokio::test]
    async fn test_follow_processes_in_arrival_order() {
        let input: &'static [u8] = b"0\nnot-a-heading\n270\n{\"alpha\": 10, \"webkitCompassHeading\": 350}\n";
        let mut source = LineHeadingSource::new(input);
        let mut subscription = source.subscribe();

        let mut compass = QiblaCompass::with_bearing(10.0);
        let mut seen = Vec::new();
        compass
            .follow(&mut subscription, |rotation, _| seen.push(rotation))
            .await;
        subscription.unsubscribe();

        assert_eq!(seen, vec![10.0, 100.0, 20.0]);
        assert_eq!(compass.heading(), Some(350.0));
    }
}
