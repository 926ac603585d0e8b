//! ScatterSession: the explicit context object for one rendered view.
//!
//! A session owns the dataset, its static layout, the per-point color buffer,
//! the current [`ViewTransform`] and the renderer. All interaction goes through
//! [`ViewEvent`]s, handled strictly in arrival order on the caller's thread:
//!
//! ```text
//! Idle ──(event)──▶ apply transform / hit-test ──▶ Rendering ──▶ Idle
//! ```
//!
//! The gesture path is the only writer of the transform; rendering and
//! hit-testing only read it. Events that arrive while a frame is being
//! produced are queued (via [`submit`](ScatterSession::submit) or an attached
//! [`ViewSink`](crate::sink::ViewSink)) and folded by
//! [`process_pending`](ScatterSession::process_pending): every gesture is
//! applied, but only the final transform is drawn.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use tiny_skia::Pixmap;

use crate::config::ScatterConfig;
use crate::data::color_table::{ColorTable, Rgba};
use crate::data::dataset::{Dataset, Point};
use crate::error::{RenderError, ScatterError};
use crate::layout::{compute_static_layout, DeviceCoordinates};
use crate::render::{find_nearest, Hit, PointProgram, PointRenderer, RenderStats};
use crate::sink::ViewEvent;
use crate::transform::{Gesture, ViewTransform, ZoomBounds};

/// Observable renderer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// The last applied transform is on screen.
    Idle,
    /// A redraw pass is in progress.
    Rendering,
}

/// What a call to [`ScatterSession::handle`] or
/// [`ScatterSession::process_pending`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameUpdate {
    /// Events consumed.
    pub events: usize,
    /// Gestures folded into the transform.
    pub transforms_applied: usize,
    /// Whether a new frame was drawn (at most one per call).
    pub rendered: bool,
    /// Stats of the frame drawn, if any.
    pub stats: Option<RenderStats>,
    /// Whether the hovered point changed.
    pub hover_changed: bool,
}

pub struct ScatterSession {
    dataset: Dataset,
    color_table: ColorTable,
    colors: Vec<Rgba>,
    layout: DeviceCoordinates,
    transform: ViewTransform,
    zoom: ZoomBounds,
    hover_radius_px: f64,
    hovered: Option<Hit>,
    /// Last pointer position inside the plot area, re-tested after the view
    /// or the layout changes.
    pointer: Option<(f64, f64)>,
    renderer: PointRenderer,
    state: RenderState,
    pending: VecDeque<ViewEvent>,
    rx: Option<Receiver<ViewEvent>>,
    frame_serial: u64,
}

impl ScatterSession {
    /// Set up a session for a `width` × `height` pixel plot area and draw the
    /// first frame at the reset view (identity, scale clamped to the zoom
    /// bounds).
    ///
    /// Any failure here (invalid config, no drawing surface, invalid point
    /// program) is terminal and nothing is drawn.
    pub fn new(
        dataset: Dataset,
        config: &ScatterConfig,
        width: u32,
        height: u32,
    ) -> Result<Self, ScatterError> {
        config.validate()?;
        let program = PointProgram::compile(config.points.size_px, config.points.opacity)?;
        let renderer = PointRenderer::new(
            width,
            height,
            program,
            config.color_scheme.plot_background(),
        )?;
        let color_table = config.color_table(&dataset);
        let colors = color_table.color_buffer(&dataset);
        let layout = compute_static_layout(&dataset, width as f64, height as f64);
        program.link(&layout, &colors)?;

        log::info!(
            "session ready: {} point(s), {} projected, {} categor{}, {width}x{height}",
            dataset.len(),
            layout.len(),
            color_table.len(),
            if color_table.len() == 1 { "y" } else { "ies" }
        );

        let mut session = Self {
            dataset,
            color_table,
            colors,
            layout,
            transform: ViewTransform::IDENTITY.apply_gesture(Gesture::Reset, &config.zoom),
            zoom: config.zoom,
            hover_radius_px: config.hover.radius_px,
            hovered: None,
            pointer: None,
            renderer,
            state: RenderState::Idle,
            pending: VecDeque::new(),
            rx: None,
            frame_serial: 0,
        };
        session.render_now()?;
        Ok(session)
    }

    /// Attach a receiver fed by a [`ViewSink`](crate::sink::ViewSink).
    pub fn attach(&mut self, rx: Receiver<ViewEvent>) {
        self.rx = Some(rx);
    }

    /// Queue an event for the next [`process_pending`](Self::process_pending).
    pub fn submit(&mut self, event: ViewEvent) {
        self.pending.push_back(event);
    }

    /// Handle one event right away. A gesture or resize produces exactly one
    /// redraw reflecting the transform as of this event.
    ///
    /// Events already queued are applied first so arrival order holds; they
    /// share the single redraw. A draw pass runs to completion inside this
    /// `&mut self` call, so `handle` can never observe `Rendering`.
    pub fn handle(&mut self, event: ViewEvent) -> Result<FrameUpdate, RenderError> {
        self.submit(event);
        self.process_pending()
    }

    /// Drain queued and channel events in arrival order and draw at most one
    /// frame, for the latest transform. Intermediate transforms are applied
    /// but never drawn.
    pub fn process_pending(&mut self) -> Result<FrameUpdate, RenderError> {
        if let Some(rx) = &self.rx {
            while let Ok(ev) = rx.try_recv() {
                self.pending.push_back(ev);
            }
        }
        let mut update = FrameUpdate::default();
        let mut dirty = false;
        while let Some(ev) = self.pending.pop_front() {
            update.events += 1;
            dirty |= self.apply_event(ev, &mut update)?;
        }
        if dirty {
            // the points moved under a still pointer
            self.rehover(&mut update);
            update.stats = Some(self.render_now()?);
            update.rendered = true;
        }
        Ok(update)
    }

    /// Apply one event to the session state. Returns whether a redraw is due.
    fn apply_event(
        &mut self,
        event: ViewEvent,
        update: &mut FrameUpdate,
    ) -> Result<bool, RenderError> {
        match event {
            ViewEvent::Gesture(g) => {
                self.transform = self.transform.apply_gesture(g, &self.zoom);
                update.transforms_applied += 1;
                Ok(true)
            }
            ViewEvent::PointerMove { x, y } => {
                self.pointer = Some((x, y));
                self.rehover(update);
                Ok(false)
            }
            ViewEvent::PointerLeave => {
                self.pointer = None;
                self.rehover(update);
                Ok(false)
            }
            ViewEvent::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Hit-test the last pointer position against the current layout and
    /// transform.
    fn rehover(&mut self, update: &mut FrameUpdate) {
        let hit = self.pointer.and_then(|(x, y)| {
            find_nearest(x, y, self.hover_radius_px, &self.layout, &self.transform)
        });
        update.hover_changed |= hit.map(|h| h.index) != self.hovered.map(|h| h.index);
        self.hovered = hit;
    }

    /// Recompute size-dependent state. Zero-area sizes (a minimized window)
    /// are ignored.
    fn resize(&mut self, width: u32, height: u32) -> Result<bool, RenderError> {
        if width == 0 || height == 0 {
            log::debug!("ignoring resize to {width}x{height}");
            return Ok(false);
        }
        if width == self.renderer.width() && height == self.renderer.height() {
            return Ok(false);
        }
        self.renderer.resize(width, height)?;
        self.layout = compute_static_layout(&self.dataset, width as f64, height as f64);
        log::debug!("relayout for {width}x{height}");
        Ok(true)
    }

    /// Redraw the current transform unconditionally.
    pub fn redraw(&mut self) -> Result<RenderStats, RenderError> {
        self.render_now()
    }

    fn render_now(&mut self) -> Result<RenderStats, RenderError> {
        self.state = RenderState::Rendering;
        let result = self
            .renderer
            .render(&self.layout, &self.colors, &self.transform);
        self.state = RenderState::Idle;
        let stats = result?;
        self.frame_serial += 1;
        Ok(stats)
    }

    /// Nearest point to `(x, y)` (plot-area pixels) within the hover radius,
    /// without changing the session's hover state.
    pub fn find_nearest(&self, x: f64, y: f64) -> Option<&Point> {
        find_nearest(x, y, self.hover_radius_px, &self.layout, &self.transform)
            .and_then(|h| self.dataset.get(h.index))
    }

    /// Data coordinates under a screen position in the plot area.
    pub fn screen_to_data(&self, sx: f64, sy: f64) -> (f64, f64) {
        let (dx, dy) = self.transform.inverse(sx, sy);
        self.layout.to_data(dx, dy)
    }

    /// Screen position (plot-area pixels) of a data coordinate.
    pub fn data_to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        self.transform
            .apply(self.layout.x_scale.apply(x), self.layout.y_scale.apply(y))
    }

    /// Data-space rectangle currently visible: `(x_min, x_max, y_min, y_max)`.
    pub fn visible_data_bounds(&self) -> (f64, f64, f64, f64) {
        let (x0, y0) = self.screen_to_data(0.0, self.layout.height);
        let (x1, y1) = self.screen_to_data(self.layout.width, 0.0);
        (x0, x1, y0, y1)
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn zoom_bounds(&self) -> ZoomBounds {
        self.zoom
    }

    pub fn hovered_hit(&self) -> Option<Hit> {
        self.hovered
    }

    pub fn hovered(&self) -> Option<&Point> {
        self.hovered.and_then(|h| self.dataset.get(h.index))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn layout(&self) -> &DeviceCoordinates {
        &self.layout
    }

    pub fn color_table(&self) -> &ColorTable {
        &self.color_table
    }

    /// The most recent frame.
    pub fn frame(&self) -> &Pixmap {
        self.renderer.frame()
    }

    /// Incremented once per completed frame.
    pub fn frame_serial(&self) -> u64 {
        self.frame_serial
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.renderer.width(), self.renderer.height())
    }
}
