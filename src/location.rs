use async_trait::async_trait;
use tracing::{debug, warn};

use crate::app::{Result, TilawaError};
use crate::domain::{Coordinates, Location};

/// Best-effort position read.
#[async_trait]
pub trait Geolocator {
    async fn locate(&self) -> Result<Coordinates>;
}

/// Coordinates supplied up front, e.g. from `--lat/--lon`.
pub struct FixedGeolocator {
    coordinates: Option<Coordinates>,
}

impl FixedGeolocator {
    pub fn new(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        let coordinates = match (latitude, longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        };
        Self { coordinates }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coordinates> {
        match self.coordinates {
            Some(c) if c.is_valid() => Ok(c),
            Some(c) => Err(TilawaError::LocationUnavailable(format!(
                "coordinates out of range: {}, {}",
                c.latitude, c.longitude
            ))),
            None => Err(TilawaError::LocationUnavailable(
                "no coordinates supplied".into(),
            )),
        }
    }
}

/// Resolves the user's location, falling back to `default` when the
/// geolocator is denied or fails.
pub async fn resolve_location(geolocator: &(dyn Geolocator + Send + Sync), default: &Location) -> Location {
    match geolocator.locate().await {
        Ok(coordinates) => {
            debug!(
                "Using located coordinates {}, {}",
                coordinates.latitude, coordinates.longitude
            );
            Location {
                city: "Current location".into(),
                country: String::new(),
                coordinates,
            }
        }
        Err(e) => {
            warn!("{}. Using default location {}", e, default.city);
            default.clone()
        }
    }
}
