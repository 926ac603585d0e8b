//! Scatterview crate root: re-exports and module wiring.
//!
//! An interactive 2D scatter viewer for projected, categorically colored point
//! sets (for example a UMAP embedding of records labelled by outcome):
//! - `data`: points, datasets, color tables and the CSV loader
//! - `layout`: the static data → device projection
//! - `transform`: pan/zoom view transform and gestures
//! - `render`: software point rasterizer, nearest-point hit-test, PNG export
//! - `session`: the explicit per-view context and its event loop
//! - `sink`: a channel for driving a session from other threads
//! - `config` / `color_scheme`: configuration and themes
//! - `app`: the eframe viewer

pub mod app;
pub mod color_scheme;
pub mod config;
pub mod data;
pub mod error;
pub mod layout;
pub mod render;
pub mod session;
pub mod sink;
pub mod ticks;
pub mod transform;

// Public re-exports for a compact external API
pub use app::{run_scatter, run_scatter_with_receiver, ScatterApp};
pub use color_scheme::ColorScheme;
pub use config::{FeatureFlags, HoverConfig, Margins, PointStyleConfig, ScatterConfig};
pub use data::color_table::{ColorTable, Rgba, DEFAULT_PALETTE};
pub use data::dataset::{Dataset, InvalidRecordPolicy, Point};
pub use data::loader::{load_csv, parse_csv, CsvColumns};
pub use error::{ConfigError, DataError, RenderError, ScatterError};
pub use layout::{compute_static_layout, DeviceCoordinates, DevicePoint, LinearScale};
pub use render::{find_nearest, Hit, PointProgram, PointRenderer, RenderStats};
pub use session::{FrameUpdate, RenderState, ScatterSession};
pub use sink::{channel_view, ViewEvent, ViewSink};
pub use transform::{Gesture, ViewTransform, ZoomBounds};
