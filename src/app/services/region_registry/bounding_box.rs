//! Rectangular latitude/longitude filter

use crate::constants::marmara_bounds;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Inclusive latitude/longitude rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::marmara()
    }
}

impl BoundingBox {
    /// Coarse box around the Marmara region
    pub fn marmara() -> Self {
        Self {
            min_latitude: marmara_bounds::MIN_LATITUDE,
            max_latitude: marmara_bounds::MAX_LATITUDE,
            min_longitude: marmara_bounds::MIN_LONGITUDE,
            max_longitude: marmara_bounds::MAX_LONGITUDE,
        }
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }

    /// Reject inverted or out-of-range rectangles
    pub fn validate(&self) -> Result<()> {
        if self.min_latitude > self.max_latitude || self.min_longitude > self.max_longitude {
            return Err(Error::configuration(format!(
                "Bounding box is inverted: lat {}..{}, lon {}..{}",
                self.min_latitude, self.max_latitude, self.min_longitude, self.max_longitude
            )));
        }

        if self.min_latitude < -90.0 || self.max_latitude > 90.0 {
            return Err(Error::configuration(
                "Bounding box latitude must stay within -90..90",
            ));
        }

        if self.min_longitude < -180.0 || self.max_longitude > 180.0 {
            return Err(Error::configuration(
                "Bounding box longitude must stay within -180..180",
            ));
        }

        Ok(())
    }
}
