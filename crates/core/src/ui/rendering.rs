//! Overlay rendering helpers.
//!
//! Everything here draws in egui points, which are the selector's logical
//! pixels. Physical values only appear as text in the readout.

use super::state::SelectionVisual;
use crate::geometry::{LogicalPoint, LogicalRect};
use eframe::egui;

/// Converts a logical rectangle to an egui rectangle.
pub fn to_egui_rect(rect: LogicalRect) -> egui::Rect {
    let max = rect.max();
    egui::Rect::from_min_max(
        egui::pos2(rect.min.x as f32, rect.min.y as f32),
        egui::pos2(max.x as f32, max.y as f32),
    )
}

/// Converts an egui position to a logical pointer sample.
pub fn to_logical(pos: egui::Pos2) -> LogicalPoint {
    LogicalPoint::new(f64::from(pos.x), f64::from(pos.y))
}

/// Splits the overlay into the four dimmed bands around `hole`.
///
/// Top and bottom span the full width; the side bands only cover the rows
/// of the hole so nothing is painted twice. Empty bands are allowed.
pub fn dim_bands(screen_rect: egui::Rect, hole: egui::Rect) -> [egui::Rect; 4] {
    let hole = hole.intersect(screen_rect);
    [
        egui::Rect::from_x_y_ranges(screen_rect.x_range(), screen_rect.min.y..=hole.min.y),
        egui::Rect::from_x_y_ranges(screen_rect.x_range(), hole.max.y..=screen_rect.max.y),
        egui::Rect::from_x_y_ranges(screen_rect.min.x..=hole.min.x, hole.y_range()),
        egui::Rect::from_x_y_ranges(hole.max.x..=screen_rect.max.x, hole.y_range()),
    ]
}

/// Dims the display, keeping the region being selected at full brightness.
///
/// With no selection the whole surface is dimmed. `alpha` comes from
/// [`Settings::dim_alpha`](super::Settings).
pub fn draw_dim_backdrop(painter: &egui::Painter, screen_rect: egui::Rect, hole: Option<egui::Rect>, alpha: u8) {
    let color = egui::Color32::from_black_alpha(alpha);
    match hole {
        None => {
            painter.rect_filled(screen_rect, 0.0, color);
        }
        Some(hole) => {
            for band in dim_bands(screen_rect, hole) {
                if band.is_positive() {
                    painter.rect_filled(band, 0.0, color);
                }
            }
        }
    }
}

/// Outlines the selection just outside its edge, so the stroke never covers
/// pixels that end up in the reported region.
pub fn draw_selection_outline(painter: &egui::Painter, selection_rect: egui::Rect) {
    painter.rect_stroke(
        selection_rect,
        0.0,
        egui::Stroke::new(OUTLINE_WIDTH, egui::Color32::WHITE),
        egui::StrokeKind::Outside,
    );
}

const OUTLINE_WIDTH: f32 = 2.0;

/// Picks where the readout label goes.
///
/// Above the selection's top-left corner when there is room, otherwise just
/// inside it. Horizontally clamped so the label stays on screen.
///
/// # Arguments
/// * `selection_rect` - The selection box
/// * `screen_rect` - The full overlay rectangle
/// * `label_size` - Size of the laid-out label
/// * `spacing` - Gap between the box and the label
pub fn calculate_readout_position(
    selection_rect: egui::Rect,
    screen_rect: egui::Rect,
    label_size: egui::Vec2,
    spacing: f32,
) -> egui::Pos2 {
    let max_x = (screen_rect.max.x - label_size.x - spacing).max(screen_rect.min.x);
    let x = selection_rect.min.x.clamp(screen_rect.min.x, max_x);

    let above = selection_rect.min.y - label_size.y - spacing;
    let y = if above >= screen_rect.min.y {
        above
    } else {
        selection_rect.min.y + spacing
    };

    egui::pos2(x, y)
}

/// Draws the physical-pixel readout next to the selection.
pub fn draw_readout(painter: &egui::Painter, screen_rect: egui::Rect, visual: &SelectionVisual) {
    let selection_rect = to_egui_rect(visual.frame);
    let galley = painter.layout_no_wrap(
        visual.readout(),
        egui::FontId::monospace(13.0),
        egui::Color32::WHITE,
    );

    let pos = calculate_readout_position(selection_rect, screen_rect, galley.size(), 6.0);
    let background = egui::Rect::from_min_size(pos, galley.size()).expand(4.0);

    painter.rect_filled(background, 3.0, egui::Color32::from_black_alpha(200));
    painter.galley(pos, galley, egui::Color32::WHITE);
}
