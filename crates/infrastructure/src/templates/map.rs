//! Map scene construction
//!
//! Builds a render-ready view of the trip geometry. The scene is plain
//! data; HTML rendering lives in the template engine so tests can assert
//! on the scene without parsing markup.

use domain::{GeoPoint, MapData, Polyline, RouteEndpoint};
use serde::{Deserialize, Serialize};

/// Default view center when no trip is shown (metropolitan France)
pub const DEFAULT_CENTER: GeoPoint = GeoPoint::new_unchecked(46.603354, 1.888334);

/// Default zoom level for the France-wide view
pub const DEFAULT_ZOOM: u8 = 6;

const SHADOW_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/images/marker-shadow.png";
const COLOR_MARKER_BASE: &str =
    "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img";

/// Marker icon image pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerIcon {
    /// Icon image URL
    pub icon_url: String,
    /// Drop shadow image URL
    pub shadow_url: String,
}

impl MarkerIcon {
    /// Create an icon from its two image URLs
    pub fn new(icon_url: impl Into<String>, shadow_url: impl Into<String>) -> Self {
        Self {
            icon_url: icon_url.into(),
            shadow_url: shadow_url.into(),
        }
    }

    fn colored(color: &str) -> Self {
        Self::new(
            format!("{COLOR_MARKER_BASE}/marker-icon-2x-{color}.png"),
            SHADOW_URL,
        )
    }
}

/// Icons for the three marker roles on the trip map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerIconSet {
    /// Charging station markers
    pub station: MarkerIcon,
    /// Departure marker
    pub start: MarkerIcon,
    /// Arrival marker
    pub end: MarkerIcon,
}

impl Default for MarkerIconSet {
    fn default() -> Self {
        Self {
            station: MarkerIcon::colored("green"),
            start: MarkerIcon::colored("blue"),
            end: MarkerIcon::colored("red"),
        }
    }
}

/// View options for building a map scene
///
/// Icons travel with the options value instead of living in global map
/// state, so two scenes built concurrently can use different sets.
#[derive(Debug, Clone, PartialEq)]
pub struct MapRenderOptions {
    /// View center when the map first opens
    pub center: GeoPoint,
    /// Initial zoom level
    pub zoom: u8,
    /// Marker icons per role
    pub icons: MarkerIconSet,
}

impl Default for MapRenderOptions {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            icons: MarkerIconSet::default(),
        }
    }
}

/// A charging station placed on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMarker {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Station name shown in the popup
    pub name: String,
    /// Street address shown under the name, when known
    pub address: Option<String>,
}

/// Departure or arrival marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointMarker {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Resolved place name, when known
    pub label: Option<String>,
}

/// Render-ready view of the trip map
///
/// Every overlay is independent: a missing polyline does not suppress the
/// stations, a station without coordinates is skipped without affecting
/// its neighbours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    /// View center as `[latitude, longitude]`
    pub center: [f64; 2],
    /// Initial zoom level
    pub zoom: u8,
    /// Route polyline, present only when non-empty
    pub polyline: Option<Polyline>,
    /// Placeable charging stations
    pub stations: Vec<StationMarker>,
    /// Departure marker
    pub start: Option<EndpointMarker>,
    /// Arrival marker
    pub end: Option<EndpointMarker>,
    /// Marker icons per role
    pub icons: MarkerIconSet,
}

impl MapScene {
    /// Build a scene from trip geometry and view options
    #[must_use]
    pub fn build(map: &MapData, options: &MapRenderOptions) -> Self {
        let polyline = map
            .route
            .as_ref()
            .filter(|line| !line.is_empty())
            .cloned();

        let stations = map
            .stations
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(|station| {
                let position = station.position()?;
                Some(StationMarker {
                    latitude: position.latitude(),
                    longitude: position.longitude(),
                    name: station.name.clone(),
                    address: station.address.clone(),
                })
            })
            .collect();

        Self {
            center: [options.center.latitude(), options.center.longitude()],
            zoom: options.zoom,
            polyline,
            stations,
            start: map.start.as_ref().and_then(endpoint_marker),
            end: map.end.as_ref().and_then(endpoint_marker),
            icons: options.icons.clone(),
        }
    }

    /// True when the scene carries no overlay at all
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.polyline.is_none()
            && self.stations.is_empty()
            && self.start.is_none()
            && self.end.is_none()
    }
}

fn endpoint_marker(endpoint: &RouteEndpoint) -> Option<EndpointMarker> {
    let position = endpoint.position()?;
    Some(EndpointMarker {
        latitude: position.latitude(),
        longitude: position.longitude(),
        label: endpoint.name.clone(),
    })
}
