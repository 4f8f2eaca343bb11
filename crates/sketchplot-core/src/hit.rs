//! Pointer hit-testing against drawn geometry
//!
//! The rendering surface draws first, then asks here which element sits
//! under the pointer. All queries are pure functions of the geometry the
//! caller passes in.

use serde::{Deserialize, Serialize};
use sketchplot_stats::Ecdf;

use crate::axis::LinearScale;

/// A point hit by the pointer
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Index into the queried point list
    pub index: usize,
    /// Distance from the pointer
    pub distance: f64,
}

/// Axis-aligned rectangle of a drawn bar
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive containment test
    pub fn contains(&self, point: [f64; 2]) -> bool {
        let [px, py] = point;
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// Hovered position on an ECDF curve
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EcdfHover {
    /// Rank in the sorted sample
    pub index: usize,
    pub value: f64,
    /// Cumulative probability at `index`
    pub probability: f64,
}

/// Nearest drawn point within `radius` of the pointer
///
/// On equal distance the later point wins, so points drawn on top are the
/// ones reported.
pub fn nearest_within(points: &[[f64; 2]], pointer: [f64; 2], radius: f64) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    let mut best_distance = radius;

    for (index, point) in points.iter().enumerate() {
        let distance = (point[0] - pointer[0]).hypot(point[1] - pointer[1]);
        if distance <= best_distance {
            best_distance = distance;
            best = Some(Hit { index, distance });
        }
    }

    best
}

/// Index of the bar containing the pointer
///
/// Adjacent bars share an edge; the later bar wins there.
pub fn bar_at(bars: &[BarRect], pointer: [f64; 2]) -> Option<usize> {
    bars.iter().rposition(|bar| bar.contains(pointer))
}

/// ECDF point nearest to the pointer's horizontal position
///
/// `scale` maps data values to the horizontal screen axis; the pointer is
/// mapped back through it before the O(log n) nearest-rank lookup.
pub fn ecdf_hover(ecdf: &Ecdf, scale: &LinearScale, pointer_x: f64) -> EcdfHover {
    let target = scale.invert(pointer_x);
    let index = ecdf.nearest_index(target);

    EcdfHover {
        index,
        value: ecdf.values()[index],
        probability: ecdf.probability_at(index),
    }
}
