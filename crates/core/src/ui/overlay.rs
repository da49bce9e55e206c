//! Fullscreen selection overlay.
//!
//! This module contains the `RegionOverlay` struct which implements the
//! `eframe::App` trait. It owns no selection logic of its own: it samples
//! the device scale, translates egui input into [`RegionSelector`] calls and
//! draws whatever the selector reports.

use super::rendering::{draw_dim_backdrop, draw_readout, draw_selection_outline, to_egui_rect, to_logical};
use super::selection::RegionSelector;
use super::settings::Settings;
use super::state::{SelectorKey, SelectorOutcome};
use crate::config::Config;
use crate::display::DisplayTarget;
use crate::error::{AppError, Result};
use crate::geometry::DeviceScale;
use crate::host::{ChannelHost, EventSender, HostEvent, OverlayHost};
use eframe::egui;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex};

/// Reports to the event channel and closes the viewport.
struct ViewportHost<'a> {
    ctx: &'a egui::Context,
    events: &'a EventSender,
}

impl OverlayHost for ViewportHost<'_> {
    fn emit(&mut self, outcome: &SelectorOutcome) -> Result<()> {
        self.events.send(outcome.into())
    }

    fn request_close(&mut self) -> Result<()> {
        let sent = self.events.send(HostEvent::CloseRequested);
        self.ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        sent
    }
}

/// The region selection overlay application.
///
/// Covers one display with a transparent, dimmed surface and lets the
/// user drag out a rectangle.
pub struct RegionOverlay {
    selector: RegionSelector,
    events: EventSender,
    config: Config,
    settings: Settings,
    activated: bool,
    minimized: bool,
    /// Outcome of the activation, filled once the selector is done.
    pub result: Arc<Mutex<Option<SelectorOutcome>>>,
}

impl RegionOverlay {
    /// Creates a new overlay.
    ///
    /// # Arguments
    /// * `config` - Selector behaviour
    /// * `settings` - Persisted presentation preferences
    /// * `events` - Channel the outcome is reported on
    /// * `result` - Shared slot for returning the outcome to the caller
    pub fn new(
        config: Config,
        settings: Settings,
        events: EventSender,
        result: Arc<Mutex<Option<SelectorOutcome>>>,
    ) -> Self {
        Self {
            selector: RegionSelector::new(DeviceScale::IDENTITY).with_min_size(config.min_selection_size),
            events,
            config,
            settings,
            activated: false,
            minimized: false,
            result,
        }
    }

    /// Samples the scale once and enters `Idle`.
    fn activate(&mut self, ctx: &egui::Context) {
        let scale = match self.config.scale_override {
            Some(scale) => scale,
            None => DeviceScale::new(f64::from(ctx.pixels_per_point())).unwrap_or_else(|e| {
                warn!("{}, falling back to 1.0", e);
                DeviceScale::IDENTITY
            }),
        };
        info!("Region selector active (scale {})", scale);
        // Ctrl +/- would change pixels_per_point after the scale was sampled
        ctx.options_mut(|o| o.zoom_with_keyboard = false);
        self.selector.activate(scale);
        self.activated = true;
    }

    fn record_outcome(&self) {
        if let Some(outcome) = self.selector.outcome() {
            if let Ok(mut slot) = self.result.lock() {
                *slot = Some(outcome);
            }
        }
    }

    /// Feeds this frame's input to the selector.
    fn handle_input(&mut self, ctx: &egui::Context, response: &egui::Response, cancel_clicked: bool) {
        let mut host = ViewportHost {
            ctx,
            events: &self.events,
        };

        let (minimized, close_requested, escape) = ctx.input(|i| {
            (
                i.viewport().minimized.unwrap_or(false),
                i.viewport().close_requested(),
                i.key_pressed(egui::Key::Escape),
            )
        });

        if minimized != self.minimized {
            self.minimized = minimized;
            debug!("Overlay {}", if minimized { "hidden" } else { "visible" });
            self.selector.on_visibility_change(!minimized, &mut host);
        }

        if close_requested || cancel_clicked {
            self.selector.on_cancel_action(&mut host);
        }

        if escape {
            self.selector.on_key_down(SelectorKey::Escape, &mut host);
        }

        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                self.selector.on_pointer_down(to_logical(pos));
            }
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                self.selector.on_pointer_move(to_logical(pos));
            }
        }

        if response.drag_stopped_by(egui::PointerButton::Primary) {
            // Pointer may have left the window on release; end at the last known position
            let pos = response
                .interact_pointer_pos()
                .or(ctx.pointer_latest_pos())
                .map(to_logical)
                .or_else(|| self.selector.session().map(|s| s.current));
            if let Some(pos) = pos {
                self.selector.on_pointer_up(pos, &mut host);
            }
        }
    }

    fn draw(&self, ui: &egui::Ui) {
        if self.selector.is_done() {
            return;
        }

        let screen_rect = ui.max_rect();
        let painter = ui.painter();

        match self.selector.visual() {
            Some(visual) => {
                let selection_rect = to_egui_rect(visual.frame);
                draw_dim_backdrop(painter, screen_rect, Some(selection_rect), self.settings.dim_alpha);
                draw_selection_outline(painter, selection_rect);
                if self.config.show_readout {
                    draw_readout(painter, screen_rect, &visual);
                }
            }
            None => {
                draw_dim_backdrop(painter, screen_rect, None, self.settings.dim_alpha);
                if self.settings.show_hint {
                    painter.text(
                        screen_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Drag to select a region, Esc to cancel",
                        egui::FontId::proportional(20.0),
                        egui::Color32::WHITE,
                    );
                }
            }
        }
    }
}

impl eframe::App for RegionOverlay {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }
}

impl RegionOverlay {
    /// Runs one frame: activation, input and painting.
    fn show(&mut self, ctx: &egui::Context) {
        if !self.activated {
            self.activate(ctx);
        }

        // Cancel control, above the drag surface so its clicks don't start a drag
        let mut cancel_clicked = false;
        if !self.selector.is_done() {
            egui::Area::new(egui::Id::new("cancel_area"))
                .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 24.0))
                .show(ctx, |ui| {
                    cancel_clicked = ui.button("Cancel").clicked();
                });
        }

        // Fullscreen panel with no margins or fill
        let panel_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(0))
            .outer_margin(egui::Margin::same(0));

        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let response = ui.interact(rect, ui.id().with("region_drag"), egui::Sense::drag());

                self.handle_input(ctx, &response, cancel_clicked);
                self.draw(ui);
            });

        self.record_outcome();
    }
}

impl Drop for RegionOverlay {
    fn drop(&mut self) {
        // Event loop ended without a terminal event (e.g. the window was
        // destroyed externally).
        if !self.selector.is_done() {
            self.selector.on_cancel_action(&mut ChannelHost::new(self.events.clone()));
            self.record_outcome();
        }
    }
}

/// Runs one activation on `target` and returns its outcome.
///
/// # Arguments
/// * `target` - Display the overlay covers
/// * `config` - Selector behaviour
/// * `settings` - Presentation preferences
/// * `events` - Channel the recording subsystem listens on
pub fn run(
    target: &DisplayTarget,
    config: Config,
    settings: Settings,
    events: EventSender,
) -> Result<SelectorOutcome> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Region Selector")
            .with_position(egui::pos2(target.x as f32, target.y as f32))
            .with_inner_size(egui::vec2(target.width as f32, target.height as f32))
            .with_fullscreen(true)
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false)
            .with_always_on_top(),
        ..Default::default()
    };

    let result = Arc::new(Mutex::new(None));
    let app_result = result.clone();

    eframe::run_native(
        "Region Selector",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(RegionOverlay::new(config, settings, events, app_result)) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| AppError::ui(format!("Failed to run overlay: {}", e)))?;

    let outcome = *result
        .lock()
        .map_err(|_| AppError::ui("Failed to acquire result lock"))?;

    Ok(outcome.unwrap_or(SelectorOutcome::Cancelled))
}
