//! Event types and a channel for driving a session from outside the UI thread.
//!
//! The viewer feeds its own pointer/wheel input into the session directly;
//! a [`ViewSink`] lets other code (scripts, tests, a remote controller) push
//! the same events. The session drains the channel in arrival order.

use std::sync::mpsc::{Receiver, SendError, Sender};

use crate::transform::{Gesture, ViewTransform};

/// One discrete interaction event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEvent {
    /// Pan/zoom/reset: produces exactly one new transform.
    Gesture(Gesture),
    /// Pointer moved to a position in plot-area pixels: one hit-test.
    PointerMove { x: f64, y: f64 },
    /// Pointer left the plot area: clears the hover.
    PointerLeave,
    /// Plot area changed size in pixels.
    Resize { width: u32, height: u32 },
}

/// Convenience sender for view events.
#[derive(Clone)]
pub struct ViewSink {
    tx: Sender<ViewEvent>,
}

/// Create a sink/receiver pair. Hand the receiver to
/// [`ScatterSession::attach`](crate::session::ScatterSession::attach).
pub fn channel_view() -> (ViewSink, Receiver<ViewEvent>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (ViewSink { tx }, rx)
}

impl ViewSink {
    pub fn send(&self, event: ViewEvent) -> Result<(), SendError<ViewEvent>> {
        self.tx.send(event)
    }

    pub fn pan(&self, dx: f64, dy: f64) -> Result<(), SendError<ViewEvent>> {
        self.send(ViewEvent::Gesture(Gesture::Pan { dx, dy }))
    }

    /// Zoom by `factor` around the screen point `(anchor_x, anchor_y)`.
    pub fn zoom(
        &self,
        factor: f64,
        anchor_x: f64,
        anchor_y: f64,
    ) -> Result<(), SendError<ViewEvent>> {
        self.send(ViewEvent::Gesture(Gesture::Zoom {
            factor,
            anchor_x,
            anchor_y,
        }))
    }

    pub fn set_transform(&self, transform: ViewTransform) -> Result<(), SendError<ViewEvent>> {
        self.send(ViewEvent::Gesture(Gesture::Set(transform)))
    }

    pub fn reset(&self) -> Result<(), SendError<ViewEvent>> {
        self.send(ViewEvent::Gesture(Gesture::Reset))
    }

    pub fn pointer_move(&self, x: f64, y: f64) -> Result<(), SendError<ViewEvent>> {
        self.send(ViewEvent::PointerMove { x, y })
    }

    pub fn resize(&self, width: u32, height: u32) -> Result<(), SendError<ViewEvent>> {
        self.send(ViewEvent::Resize { width, height })
    }
}
