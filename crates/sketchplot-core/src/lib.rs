//! sketchplot-core - Chart preparation for CSV sketches
//!
//! Turns table columns into everything a rendering surface needs to draw a
//! box plot, histogram (linear or log), ECDF, strip plot, bar chart or
//! heatmap:
//!
//! - **axis**: "nice" tick steps, tick values, linear scales
//! - **hit**: pointer hit-testing against already drawn geometry
//! - **group**: per-category grouping, top-N selection, heatmap cross-tabs
//! - **chart**: one preparation pipeline per chart kind
//! - **config**: explicit, file-loadable chart parameters
//!
//! Nothing here draws. The core hands back numbers; pixels belong to the
//! caller.

pub mod axis;
pub mod chart;
pub mod config;
pub mod error;
pub mod group;
pub mod hit;

pub use axis::*;
pub use chart::*;
pub use config::*;
pub use error::*;
pub use group::*;
pub use hit::*;

pub use sketchplot_io as io;
pub use sketchplot_stats as stats;
