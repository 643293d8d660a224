//! Data types shared by the extractor and the updater.

use std::collections::HashMap;

use serde::Serialize;

/// A circle extracted from a DXF drawing: center coordinates and radius,
/// in drawing units (millimeters for KiCad-bound workflows).
///
/// Coordinates are rounded at extraction time (x/y to 2 decimals, r to 1).
/// That rounding is the working tolerance for deduplication and radius
/// filtering downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl Circle {
    pub fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }
}

/// A named radius category.
///
/// `radius: None` is a catch-all that matches every circle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadiusClass {
    pub label: String,
    pub radius: Option<f64>,
}

impl RadiusClass {
    pub fn new(label: impl Into<String>, radius: Option<f64>) -> Self {
        Self {
            label: label.into(),
            radius,
        }
    }
}

/// A classified circle with its per-label channel number (1-based,
/// first-seen order).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledCircle {
    pub label: String,
    pub channel: usize,
    #[serde(flatten)]
    pub circle: Circle,
}

/// Round to two decimal places (center coordinates).
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Round to one decimal place (radii).
pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Equality on already-rounded radii, tolerant of representation error.
pub(crate) fn radius_matches(r: f64, target: f64) -> bool {
    (r - target).abs() <= f64::EPSILON * r.abs().max(target.abs()).max(1.0)
}

/// Assign labels and per-label channel numbers to an ordered coordinate
/// list.
///
/// Each circle takes the first class whose radius is absent (catch-all) or
/// equal to the circle's rounded radius. Circles matching no class are
/// dropped. Channels number 1..N per label in list order.
pub fn classify_circles(circles: &[Circle], classes: &[RadiusClass]) -> Vec<LabeledCircle> {
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut labeled = Vec::new();

    for circle in circles {
        let class = classes.iter().find(|c| match c.radius {
            None => true,
            Some(target) => radius_matches(circle.r, target),
        });
        if let Some(class) = class {
            let counter = counters.entry(class.label.clone()).or_insert(0);
            *counter += 1;
            labeled.push(LabeledCircle {
                label: class.label.clone(),
                channel: *counter,
                circle: *circle,
            });
        }
    }

    labeled
}
