//! Native viewer built on eframe.
//!
//! | Sub-module      | Responsibility |
//! | --------------- | -------------- |
//! | [`scatter_app`] | [`ScatterApp`]: input → session events, texture upload, panels |
//! | [`overlay`]     | Axes, legend, hover ring and tooltip painting |
//! | [`run`]         | [`run_scatter()`] entry points |

mod overlay;
mod run;
mod scatter_app;

pub use run::{run_scatter, run_scatter_with_receiver};
pub use scatter_app::ScatterApp;
