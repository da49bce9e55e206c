//! Selector state types.
//!
//! This module contains the state machine and outcome types used by the
//! region selector.

use crate::geometry::{LogicalPoint, LogicalRect, PhysicalRect, Region};

/// Result of one overlay activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorOutcome {
    /// The user dragged out a region large enough to keep.
    Committed(Region),
    /// No region was selected.
    Cancelled,
}

impl SelectorOutcome {
    /// Returns the committed region, if any.
    pub fn region(&self) -> Option<Region> {
        match self {
            SelectorOutcome::Committed(region) => Some(*region),
            SelectorOutcome::Cancelled => None,
        }
    }
}

/// Current state of the selector.
///
/// The selector follows a strict state machine:
/// `Idle` -> `Dragging` -> `Committing` | `Cancelling` -> `Done`
///  \-> `Cancelling` -> `Done`
///
/// `Committing` and `Cancelling` only exist while the outcome is being
/// delivered; they are what keeps a re-entrant trigger from starting over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectorState {
    /// Waiting for the first pointer-down.
    #[default]
    Idle,
    /// A drag is in progress.
    Dragging,
    /// Delivering a committed region.
    Committing,
    /// Delivering a cancellation.
    Cancelling,
    /// Outcome delivered; inert until reactivated.
    Done,
}

impl SelectorState {
    /// True for the states that may still be cancelled.
    pub fn is_open(self) -> bool {
        matches!(self, SelectorState::Idle | SelectorState::Dragging)
    }
}

/// What ended an activation without a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelTrigger {
    /// Escape was pressed.
    Escape,
    /// The cancel control (or the window's close button) was used.
    CancelAction,
    /// The overlay was hidden and shown again.
    VisibilityRestored,
    /// The drag ended below the minimum size.
    TooSmall,
    /// The converted rectangle had no area.
    InvalidGeometry,
}

/// Keys the selector reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKey {
    Escape,
    Other,
}

/// One in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// False once pointer-up has consumed the session.
    pub active: bool,
    pub anchor: LogicalPoint,
    pub current: LogicalPoint,
}

impl DragSession {
    /// Starts a zero-size session at `anchor`.
    pub fn start(anchor: LogicalPoint) -> Self {
        Self {
            active: true,
            anchor,
            current: anchor,
        }
    }

    /// Bounding box of anchor and current position.
    pub fn bounds(&self) -> LogicalRect {
        LogicalRect::spanning(self.anchor, self.current)
    }
}

/// Everything the renderer needs to draw the current selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionVisual {
    /// Box to draw, in unscaled logical pixels.
    pub frame: LogicalRect,
    /// Same box in physical pixels, for the coordinate readout.
    pub physical: PhysicalRect,
    /// Scale the readout was computed with.
    pub scale: f64,
}

impl SelectionVisual {
    /// Text shown next to the selection box.
    pub fn readout(&self) -> String {
        format!(
            "X: {}, Y: {}, Width: {}, Height: {} (DPI: {})",
            self.physical.x, self.physical.y, self.physical.width, self.physical.height, self.scale
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_uses_physical_pixels() {
        let visual = SelectionVisual {
            frame: LogicalRect::spanning(LogicalPoint::new(100.0, 100.0), LogicalPoint::new(300.0, 250.0)),
            physical: PhysicalRect {
                x: 150,
                y: 150,
                width: 300,
                height: 225,
            },
            scale: 1.5,
        };
        assert_eq!(visual.readout(), "X: 150, Y: 150, Width: 300, Height: 225 (DPI: 1.5)");
    }

    #[test]
    fn only_idle_and_dragging_are_open() {
        assert!(SelectorState::Idle.is_open());
        assert!(SelectorState::Dragging.is_open());
        assert!(!SelectorState::Committing.is_open());
        assert!(!SelectorState::Cancelling.is_open());
        assert!(!SelectorState::Done.is_open());
    }
}
