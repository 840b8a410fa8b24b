//! Template engine module for rendering the trip map page
//!
//! Uses the Tera templating engine to turn a built [`MapScene`] into a
//! self-contained Leaflet HTML page.
//!
//! # Template Locations
//!
//! Templates can be loaded from:
//! - Embedded templates (compile-time)
//! - File system (runtime, configurable)
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::templates::{MapRenderOptions, MapScene, TemplateEngine};
//!
//! let engine = TemplateEngine::new()?;
//! let scene = MapScene::build(&map_data, &MapRenderOptions::default());
//! let html = engine.render_map(&scene)?;
//! std::fs::write("trip_map.html", html)?;
//! ```

pub mod map;
pub mod summary;

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tera::{Context, Tera};
use thiserror::Error;
use tracing::{debug, info};

pub use map::{EndpointMarker, MapRenderOptions, MapScene, MarkerIcon, MarkerIconSet, StationMarker};
pub use summary::{SummaryLine, SummaryPanel, format_quantity};

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Render(String),

    /// Template compilation failed
    #[error("Template compilation failed: {0}")]
    Compile(String),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

/// Template context wrapper for type-safe context building
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    inner: Context,
}

impl TemplateContext {
    /// Create a new empty template context
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Context::new(),
        }
    }

    /// Insert a value into the context
    pub fn insert<T: Serialize>(&mut self, key: &str, value: &T) {
        self.inner.insert(key, value);
    }

    /// Get the inner Tera context
    #[must_use]
    pub fn into_inner(self) -> Context {
        self.inner
    }
}

/// Template engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Path to custom templates directory (optional)
    #[serde(default)]
    pub templates_dir: Option<String>,

    /// Whether to use embedded templates as fallback
    #[serde(default = "default_true")]
    pub use_embedded_fallback: bool,

    /// Whether to auto-escape HTML by default
    #[serde(default = "default_true")]
    pub auto_escape: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            templates_dir: None,
            use_embedded_fallback: true,
            auto_escape: true,
        }
    }
}

/// Embedded templates - compiled into the binary
mod embedded {
    pub const MAP_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Trip map</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" />
    <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
    <style>
        html, body, #map { height: 100%; margin: 0; }
    </style>
</head>
<body>
    <div id="map"></div>
    <script>
        const map = L.map('map').setView([{{ center_lat }}, {{ center_lng }}], {{ zoom }});
        L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
            attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors'
        }).addTo(map);

        const markerIcon = (urls) => L.icon({
            iconUrl: urls.icon_url,
            shadowUrl: urls.shadow_url,
            iconSize: [25, 41],
            iconAnchor: [12, 41],
            popupAnchor: [1, -34],
            shadowSize: [41, 41]
        });
        const icons = {{ icons | json_encode() | safe }};
        const stationIcon = markerIcon(icons.station);
        const startIcon = markerIcon(icons.start);
        const endIcon = markerIcon(icons.end);
{% if polyline %}
        L.polyline({{ polyline | json_encode() | safe }}, {
            color: '#3498db',
            weight: 4,
            opacity: 0.8,
            dashArray: '10, 10'
        }).addTo(map);
{% endif %}{% for station in stations %}
        L.marker([{{ station.latitude }}, {{ station.longitude }}], { icon: stationIcon })
            .addTo(map)
            .bindPopup("<b>{{ station.name }}</b>{% if station.address %}<br>{{ station.address }}{% endif %}");
{% endfor %}{% if start %}
        L.marker([{{ start.latitude }}, {{ start.longitude }}], { icon: startIcon })
            .addTo(map){% if start.label %}
            .bindPopup("{{ start.label }}"){% endif %};
{% endif %}{% if end %}
        L.marker([{{ end.latitude }}, {{ end.longitude }}], { icon: endIcon })
            .addTo(map){% if end.label %}
            .bindPopup("{{ end.label }}"){% endif %};
{% endif %}    </script>
</body>
</html>
"#;
}

/// Template engine using Tera
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Arc<Tera>,
    config: TemplateConfig,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TemplateEngine {
    /// Create a new template engine with default configuration
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_config(TemplateConfig::default())
    }

    /// Create a new template engine with custom configuration
    pub fn with_config(config: TemplateConfig) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();

        // Set auto-escape based on config
        tera.autoescape_on(if config.auto_escape {
            vec![".html", ".htm", ".xml"]
        } else {
            vec![]
        });

        // Load embedded templates
        tera.add_raw_template("map/page.html", embedded::MAP_PAGE)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;

        // Load custom templates from directory if specified
        if let Some(ref dir) = config.templates_dir {
            let path = Path::new(dir);
            if path.exists() {
                let pattern = format!("{dir}/**/*");
                match Tera::parse(&pattern) {
                    Ok(custom_tera) => {
                        for name in custom_tera.get_template_names() {
                            if let Ok(template) = custom_tera.render(name, &Context::new()) {
                                debug!(template = %name, "Loaded custom template");
                                if let Err(e) = tera.add_raw_template(name, &template) {
                                    debug!(error = %e, "Failed to add custom template {name}");
                                }
                            }
                        }
                        info!(dir = %dir, "Loaded custom templates");
                    },
                    Err(e) => {
                        if !config.use_embedded_fallback {
                            return Err(TemplateError::Compile(e.to_string()));
                        }
                        debug!(error = %e, "Custom templates failed to load, using embedded");
                    },
                }
            }
        }

        Ok(Self {
            tera: Arc::new(tera),
            config,
        })
    }

    /// Render a template with the given context
    pub fn render(
        &self,
        template_name: &str,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        self.tera
            .render(template_name, &context.inner)
            .map_err(TemplateError::from)
    }

    /// Render a map scene into a self-contained Leaflet page
    pub fn render_map(&self, scene: &MapScene) -> Result<String, TemplateError> {
        let mut ctx = TemplateContext::new();
        ctx.insert("center_lat", &scene.center[0]);
        ctx.insert("center_lng", &scene.center[1]);
        ctx.insert("zoom", &scene.zoom);
        ctx.insert("polyline", &scene.polyline);
        ctx.insert("stations", &scene.stations);
        ctx.insert("start", &scene.start);
        ctx.insert("end", &scene.end);
        ctx.insert("icons", &scene.icons);

        self.render("map/page.html", &ctx)
    }

    /// Check if a template exists
    #[must_use]
    pub fn template_exists(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }

    /// List all available template names
    #[must_use]
    pub fn list_templates(&self) -> Vec<&str> {
        self.tera.get_template_names().collect()
    }
}
