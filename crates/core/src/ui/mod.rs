//! User interface components for region-select.
//!
//! This module provides the fullscreen overlay the user drags a selection
//! box on, and the state machine behind it.
//!
//! # Architecture
//!
//! The UI is split into focused submodules:
//! - [`state`]: State machine and outcome types
//! - [`selection`]: The [`RegionSelector`] state machine, free of egui
//! - [`settings`]: User preferences and persistence
//! - [`rendering`]: Drawing utilities for the backdrop, border and readout
//! - [`overlay`]: The eframe application wiring egui input to the selector
//!
//! # Usage
//!
//! ```ignore
//! use region_select_core::{display::DisplayCatalog, host::event_channel, ui, Config};
//!
//! let catalog = DisplayCatalog::new()?;
//! let (events, mut rx) = event_channel();
//!
//! match ui::run_region_selector(catalog.primary(), Config::load()?, ui::Settings::load(), events)? {
//!     ui::SelectorOutcome::Committed(region) => println!("{}", region),
//!     ui::SelectorOutcome::Cancelled => println!("cancelled"),
//! }
//! ```

mod overlay;
mod rendering;
mod selection;
mod settings;
mod state;

// Public API exports
pub use overlay::RegionOverlay;
pub use selection::{RegionSelector, MIN_SELECTION_SIZE};
pub use settings::{Settings, DEFAULT_DIM_ALPHA};
pub use state::{
    CancelTrigger, DragSession, SelectionVisual, SelectorKey, SelectorOutcome, SelectorState,
};

use crate::config::Config;
use crate::display::DisplayTarget;
use crate::error::Result;
use crate::host::EventSender;

/// Covers `target` with the selection overlay until the user commits or
/// cancels.
///
/// The outcome is sent on `events` (followed by a close request) and also
/// returned.
///
/// # Returns
/// - `Ok(SelectorOutcome::Committed(region))` - User selected a region
/// - `Ok(SelectorOutcome::Cancelled)` - No region was selected
/// - `Err(e)` - The overlay window could not be created or run
pub fn run_region_selector(
    target: &DisplayTarget,
    config: Config,
    settings: Settings,
    events: EventSender,
) -> Result<SelectorOutcome> {
    overlay::run(target, config, settings, events)
}
