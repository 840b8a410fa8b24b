//! Trip summary panel construction
//!
//! Turns the committed vehicle and route slices into ready-to-print
//! labeled lines. A field renders only when it carries a usable value;
//! there is no placeholder text for missing data.

use domain::{RouteInfo, VehicleDetails};

/// A single labeled summary line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    /// Field label
    pub label: &'static str,
    /// Formatted value
    pub value: String,
}

/// Ready-to-print trip summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryPanel {
    lines: Vec<SummaryLine>,
}

impl SummaryPanel {
    /// Build the panel from whatever slices are present
    ///
    /// Absent, zero, or non-finite numbers and empty strings all produce
    /// no line. With neither slice the panel is empty.
    #[must_use]
    pub fn build(vehicle: Option<&VehicleDetails>, route: Option<&RouteInfo>) -> Self {
        let mut lines = Vec::new();

        if let Some(vehicle) = vehicle {
            push_text(&mut lines, "Vehicle", &vehicle.display_name());
            push_quantity(&mut lines, "Best range", vehicle.best_range_km, "km");
            push_text(
                &mut lines,
                "Image",
                vehicle.image_url.as_deref().unwrap_or_default(),
            );
        }

        if let Some(route) = route {
            push_quantity(&mut lines, "Distance", route.distance_km, "km");
            push_quantity(&mut lines, "Duration", route.duration_hours, "h");
            push_quantity(&mut lines, "Price", route.price, "€");
            if let Some(count) = route.station_count.filter(|&count| count > 0) {
                lines.push(SummaryLine {
                    label: "Charging stops",
                    value: count.to_string(),
                });
            }
            push_quantity(
                &mut lines,
                "Optimal charging time",
                route.charging_minutes,
                "min",
            );
        }

        Self { lines }
    }

    /// The lines in display order
    #[must_use]
    pub fn lines(&self) -> &[SummaryLine] {
        &self.lines
    }

    /// True when nothing rendered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Format a fractional quantity with exactly one decimal place
///
/// Single formatting policy for every numeric field shown to the user.
pub fn format_quantity(value: f64, unit: &str) -> String {
    format!("{value:.1} {unit}")
}

fn push_quantity(lines: &mut Vec<SummaryLine>, label: &'static str, value: Option<f64>, unit: &str) {
    if let Some(value) = value.filter(|v| v.is_finite() && *v > 0.0) {
        lines.push(SummaryLine {
            label,
            value: format_quantity(value, unit),
        });
    }
}

fn push_text(lines: &mut Vec<SummaryLine>, label: &'static str, value: &str) {
    let trimmed = value.trim();
    if !trimmed.is_empty() {
        lines.push(SummaryLine {
            label,
            value: trimmed.to_string(),
        });
    }
}
