//! Selection state machine.
//!
//! [`RegionSelector`] turns a stream of pointer, keyboard and visibility
//! events into exactly one [`SelectorOutcome`] per activation. It knows
//! nothing about egui; the overlay feeds it logical coordinates and hands it
//! an [`OverlayHost`] to report through.

use super::state::{
    CancelTrigger, DragSession, SelectionVisual, SelectorKey, SelectorOutcome, SelectorState,
};
use crate::error::AppError;
use crate::geometry::{DeviceScale, LogicalPoint, Region};
use crate::host::OverlayHost;
use log::{debug, error, warn};

/// Minimum size (in physical pixels, exclusive) for a drag to be kept.
pub const MIN_SELECTION_SIZE: u32 = 10;

/// Drag-to-select state machine for one overlay.
///
/// The same instance can serve any number of activations: [`activate`]
/// resets it to `Idle` with a freshly sampled scale.
///
/// [`activate`]: RegionSelector::activate
#[derive(Debug, Clone)]
pub struct RegionSelector {
    state: SelectorState,
    scale: DeviceScale,
    min_size: u32,
    session: Option<DragSession>,
    hidden: bool,
    outcome: Option<SelectorOutcome>,
}

impl RegionSelector {
    /// Creates a selector in `Idle`, ready for the first pointer-down.
    pub fn new(scale: DeviceScale) -> Self {
        Self {
            state: SelectorState::Idle,
            scale,
            min_size: MIN_SELECTION_SIZE,
            session: None,
            hidden: false,
            outcome: None,
        }
    }

    /// Raises the minimum selection size. Values below
    /// [`MIN_SELECTION_SIZE`] are ignored.
    pub fn with_min_size(mut self, min_size: u32) -> Self {
        if min_size < MIN_SELECTION_SIZE {
            warn!("Minimum selection size {} below {}px, keeping {}", min_size, MIN_SELECTION_SIZE, MIN_SELECTION_SIZE);
        }
        self.min_size = min_size.max(MIN_SELECTION_SIZE);
        self
    }

    /// Starts a new activation with the given scale.
    ///
    /// Discards any state left from a previous activation, including an
    /// unfinished drag.
    pub fn activate(&mut self, scale: DeviceScale) {
        debug!("Activating region selector (scale {})", scale);
        self.state = SelectorState::Idle;
        self.scale = scale;
        self.session = None;
        self.hidden = false;
        self.outcome = None;
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn scale(&self) -> DeviceScale {
        self.scale
    }

    pub fn min_size(&self) -> u32 {
        self.min_size
    }

    /// The in-progress drag, if any.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Outcome of the current activation once it reached `Done`.
    ///
    /// When the host rejected the original outcome this is `Cancelled`.
    pub fn outcome(&self) -> Option<SelectorOutcome> {
        self.outcome
    }

    pub fn is_done(&self) -> bool {
        self.state == SelectorState::Done
    }

    /// Selection box and readout to draw, `None` when nothing is shown.
    pub fn visual(&self) -> Option<SelectionVisual> {
        if self.state != SelectorState::Dragging {
            return None;
        }
        let session = self.session.as_ref().filter(|s| s.active)?;
        let frame = session.bounds();
        Some(SelectionVisual {
            frame,
            physical: frame.to_physical(self.scale),
            scale: self.scale.factor(),
        })
    }

    /// Primary button pressed: starts a drag from `Idle`.
    pub fn on_pointer_down(&mut self, pos: LogicalPoint) {
        if self.state != SelectorState::Idle || self.hidden {
            return;
        }
        debug!("Drag started at ({}, {})", pos.x, pos.y);
        self.session = Some(DragSession::start(pos));
        self.state = SelectorState::Dragging;
    }

    /// Pointer moved: extends the drag.
    pub fn on_pointer_move(&mut self, pos: LogicalPoint) {
        if self.state != SelectorState::Dragging {
            return;
        }
        if let Some(session) = self.session.as_mut().filter(|s| s.active) {
            session.current = pos;
        }
    }

    /// Primary button released: commits the drag or cancels it when too
    /// small.
    pub fn on_pointer_up(&mut self, pos: LogicalPoint, host: &mut dyn OverlayHost) {
        if self.state != SelectorState::Dragging {
            return;
        }
        let Some(session) = self.session.as_mut().filter(|s| s.active) else {
            return;
        };
        session.current = pos;
        session.active = false;

        let physical = session.bounds().to_physical(self.scale);
        if !physical.exceeds(self.min_size) {
            debug!(
                "Selection {}x{} not above {}px, treating as no selection",
                physical.width, physical.height, self.min_size
            );
            self.cancel(CancelTrigger::TooSmall, host);
            return;
        }

        match Region::try_from(physical) {
            Ok(region) => {
                self.state = SelectorState::Committing;
                self.finish(SelectorOutcome::Committed(region), host);
            }
            Err(e) => {
                warn!("Rejecting selection: {}", e);
                self.cancel(CancelTrigger::InvalidGeometry, host);
            }
        }
    }

    /// Key pressed: Escape cancels, everything else is ignored.
    pub fn on_key_down(&mut self, key: SelectorKey, host: &mut dyn OverlayHost) {
        if key == SelectorKey::Escape {
            self.cancel(CancelTrigger::Escape, host);
        }
    }

    /// Cancel control activated.
    pub fn on_cancel_action(&mut self, host: &mut dyn OverlayHost) {
        self.cancel(CancelTrigger::CancelAction, host);
    }

    /// Overlay hidden or shown.
    ///
    /// Hiding only marks the session; coming back after being hidden ends
    /// the activation as cancelled, whether or not a drag was running.
    pub fn on_visibility_change(&mut self, visible: bool, host: &mut dyn OverlayHost) {
        if !visible {
            if self.state.is_open() {
                self.hidden = true;
            }
            return;
        }
        if !std::mem::take(&mut self.hidden) {
            return;
        }
        if self.state == SelectorState::Dragging {
            warn!("{}", AppError::StaleSession);
        }
        self.cancel(CancelTrigger::VisibilityRestored, host);
    }

    fn cancel(&mut self, trigger: CancelTrigger, host: &mut dyn OverlayHost) {
        if !self.state.is_open() {
            return;
        }
        debug!("Cancelling selection ({:?})", trigger);
        self.state = SelectorState::Cancelling;
        self.finish(SelectorOutcome::Cancelled, host);
    }

    /// Delivers the outcome, requests close and clears all state.
    ///
    /// Runs only from `Committing` or `Cancelling`; state ends in `Done`
    /// no matter what the host returns.
    fn finish(&mut self, outcome: SelectorOutcome, host: &mut dyn OverlayHost) {
        let delivered = match host.emit(&outcome) {
            Ok(()) => outcome,
            Err(e) => {
                error!("Failed to deliver {:?} to host: {}", outcome, e);
                SelectorOutcome::Cancelled
            }
        };

        if let Err(e) = host.request_close() {
            error!("Failed to request overlay close: {}", e);
        }

        self.session = None;
        self.hidden = false;
        self.outcome = Some(delivered);
        self.state = SelectorState::Done;
    }
}

impl Default for RegionSelector {
    fn default() -> Self {
        Self::new(DeviceScale::IDENTITY)
    }
}
