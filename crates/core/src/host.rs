//! Host-facing sink for selector outcomes.
//!
//! The selector never talks to a window system directly. It reports through
//! an [`OverlayHost`], which the eframe overlay implements on top of an
//! [`EventSender`] and the viewport, and which tests implement with plain
//! vectors.

use crate::error::{AppError, Result};
use crate::geometry::Region;
use crate::ui::SelectorOutcome;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Sink the selector reports to.
///
/// Each activation calls [`emit`](OverlayHost::emit) exactly once and then
/// [`request_close`](OverlayHost::request_close) exactly once, in that order.
pub trait OverlayHost {
    /// Delivers the outcome of the activation.
    fn emit(&mut self, outcome: &SelectorOutcome) -> Result<()>;

    /// Asks the host to dismiss the overlay surface.
    fn request_close(&mut self) -> Result<()>;
}

/// Activation request from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    /// Display the overlay covers.
    pub target_display_handle: i64,
}

/// Events delivered to the recording subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum HostEvent {
    /// The user committed a region.
    RegionSelected(Region),
    /// The activation ended without a region.
    RegionCancelled,
    /// The overlay asks to be dismissed.
    CloseRequested,
}

impl From<&SelectorOutcome> for HostEvent {
    fn from(outcome: &SelectorOutcome) -> Self {
        match outcome {
            SelectorOutcome::Committed(region) => HostEvent::RegionSelected(*region),
            SelectorOutcome::Cancelled => HostEvent::RegionCancelled,
        }
    }
}

/// Sending half of the host event channel.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: UnboundedSender<HostEvent>,
}

impl EventSender {
    /// Sends an event, failing with [`AppError::Transport`] once the
    /// receiver is gone.
    pub fn send(&self, event: HostEvent) -> Result<()> {
        self.tx
            .send(event)
            .map_err(|e| AppError::transport(format!("host channel closed, dropped {:?}", e.0)))
    }
}

/// Creates the channel the overlay reports through.
pub fn event_channel() -> (EventSender, UnboundedReceiver<HostEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender { tx }, rx)
}

/// Host that forwards everything to an [`EventSender`].
///
/// Used directly when no window needs closing (headless drivers); the
/// overlay wraps it to also close its viewport.
#[derive(Debug, Clone)]
pub struct ChannelHost {
    events: EventSender,
}

impl ChannelHost {
    pub fn new(events: EventSender) -> Self {
        Self { events }
    }
}

impl OverlayHost for ChannelHost {
    fn emit(&mut self, outcome: &SelectorOutcome) -> Result<()> {
        self.events.send(outcome.into())
    }

    fn request_close(&mut self) -> Result<()> {
        self.events.send(HostEvent::CloseRequested)
    }
}
