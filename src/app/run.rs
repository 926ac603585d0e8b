//! Top-level entry point for running the scatter viewer as a native window.

use std::sync::mpsc::Receiver;

use eframe::egui;

use crate::config::ScatterConfig;
use crate::data::dataset::Dataset;
use crate::sink::ViewEvent;

use super::ScatterApp;

/// Open a native window showing `dataset`. Blocks until the window is closed.
pub fn run_scatter(dataset: Dataset, cfg: ScatterConfig) -> eframe::Result<()> {
    run_scatter_with_receiver(dataset, cfg, None)
}

/// Like [`run_scatter`], additionally draining view events sent through a
/// [`ViewSink`](crate::sink::ViewSink).
pub fn run_scatter_with_receiver(
    dataset: Dataset,
    cfg: ScatterConfig,
    rx: Option<Receiver<ViewEvent>>,
) -> eframe::Result<()> {
    let title = cfg.title.clone();
    let mut app = ScatterApp::new(dataset, cfg);
    if let Some(rx) = rx {
        app = app.with_receiver(rx);
    }

    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([320.0, 240.0])
            .with_title(title.clone()),
        ..Default::default()
    };

    eframe::run_native(&title, opts, Box::new(|_cc| Ok(Box::new(app))))
}
