//! Map view configuration.

use domain::GeoPoint;
use serde::{Deserialize, Serialize};

use crate::templates::map::{DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::templates::{MapRenderOptions, MarkerIcon, MarkerIconSet};

/// Map view configuration
///
/// Controls the initial viewport and allows overriding the marker icon
/// images. Unset icon fields fall back to the bundled color marker set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapAppConfig {
    /// Initial view center latitude (default: center of metropolitan France)
    #[serde(default = "default_center_latitude")]
    pub center_latitude: f64,

    /// Initial view center longitude
    #[serde(default = "default_center_longitude")]
    pub center_longitude: f64,

    /// Initial zoom level (default: 6)
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    /// Charging station marker icon URL override
    #[serde(default)]
    pub station_icon_url: Option<String>,

    /// Departure marker icon URL override
    #[serde(default)]
    pub start_icon_url: Option<String>,

    /// Arrival marker icon URL override
    #[serde(default)]
    pub end_icon_url: Option<String>,

    /// Marker shadow URL override, applied to all three roles
    #[serde(default)]
    pub marker_shadow_url: Option<String>,
}

const fn default_center_latitude() -> f64 {
    DEFAULT_CENTER.latitude()
}

const fn default_center_longitude() -> f64 {
    DEFAULT_CENTER.longitude()
}

const fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}

impl Default for MapAppConfig {
    fn default() -> Self {
        Self {
            center_latitude: default_center_latitude(),
            center_longitude: default_center_longitude(),
            zoom: default_zoom(),
            station_icon_url: None,
            start_icon_url: None,
            end_icon_url: None,
            marker_shadow_url: None,
        }
    }
}

impl MapAppConfig {
    /// Validate the section
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending field.
    pub fn validate(&self) -> Result<(), String> {
        GeoPoint::new(self.center_latitude, self.center_longitude)
            .map_err(|e| format!("map.center is invalid: {e}"))?;
        if !(1..=19).contains(&self.zoom) {
            return Err(format!("map.zoom must be between 1 and 19, got {}", self.zoom));
        }
        Ok(())
    }

    /// Convert to render options for the scene builder
    #[must_use]
    pub fn to_render_options(&self) -> MapRenderOptions {
        let defaults = MarkerIconSet::default();
        let center =
            GeoPoint::new(self.center_latitude, self.center_longitude).unwrap_or(DEFAULT_CENTER);

        let resolve = |icon_url: Option<&String>, default: MarkerIcon| MarkerIcon {
            icon_url: icon_url.cloned().unwrap_or(default.icon_url),
            shadow_url: self
                .marker_shadow_url
                .clone()
                .unwrap_or(default.shadow_url),
        };

        MapRenderOptions {
            center,
            zoom: self.zoom,
            icons: MarkerIconSet {
                station: resolve(self.station_icon_url.as_ref(), defaults.station),
                start: resolve(self.start_icon_url.as_ref(), defaults.start),
                end: resolve(self.end_icon_url.as_ref(), defaults.end),
            },
        }
    }
}
