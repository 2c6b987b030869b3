//! Radial picker geometry for tap-to-place.
//!
//! On touch layouts, tapping an item opens a fan of destination buttons —
//! one per tier, in board order — arranged on a semicircular arc hinged
//! near the tapped point. This module computes those button centers as a
//! pure function of the anchor, the viewport, and the tier list: the
//! radius grows just enough that adjacent buttons never overlap, the
//! panel flips above the anchor when it would overflow the viewport
//! bottom, and the whole panel is clamped inside the viewport with a
//! fixed margin. Re-invoking with identical inputs yields identical
//! output, so a label edit while the picker is open rebuilds in place.

#[cfg(test)]
#[path = "picker_test.rs"]
mod picker_test;

use std::f64::consts::PI;

use crate::board::TierId;
use crate::consts::{
    LABEL_PLACEHOLDER, PICKER_ANCHOR_LIFT, PICKER_BUTTON_DIAMETER, PICKER_EDGE_MARGIN,
    PICKER_FLOOR_RADIUS, PICKER_HINGE_INSET, PICKER_MIN_GAP, PICKER_PANEL_H, PICKER_PANEL_W,
};
use crate::error::BoardError;

/// A point in screen coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Viewport extents in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One destination button, ready for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerButton {
    /// Tier this button places into.
    pub tier_id: TierId,
    /// Short label: first two characters of the tier label, uppercased.
    pub label: String,
    /// Absolute screen center of the button.
    pub center: Point,
}

/// Computed picker layout: the panel box and its buttons.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerLayout {
    /// Top-left corner of the panel in screen coordinates.
    pub origin: Point,
    /// Panel width.
    pub width: f64,
    /// Panel height.
    pub height: f64,
    /// Buttons in board tier order, angularly monotonic left to right.
    pub buttons: Vec<PickerButton>,
}

/// Compute the picker layout for `tiers` around `anchor`.
///
/// # Errors
///
/// [`BoardError::InvalidState`] when `tiers` is empty — a board with no
/// tiers must not open the picker.
pub fn layout(
    anchor: Point,
    viewport: Viewport,
    tiers: &[(TierId, String)],
) -> Result<PickerLayout, BoardError> {
    if tiers.is_empty() {
        return Err(BoardError::InvalidState("picker needs at least one destination tier"));
    }

    // Neighboring buttons sit one angular step apart across a half-turn.
    // The radius is the smallest that keeps adjacent centers a full
    // button-plus-gap chord apart, floored for one- and two-tier fans.
    let gaps = tiers.len().saturating_sub(1).max(1);
    #[allow(clippy::cast_precision_loss)]
    let step = PI / (gaps as f64);
    let min_radius = (PICKER_BUTTON_DIAMETER + PICKER_MIN_GAP) / (2.0 * (step / 2.0).sin());
    let radius = min_radius.max(PICKER_FLOOR_RADIUS);

    let hinge_x = PICKER_PANEL_W / 2.0;
    let hinge_y = PICKER_PANEL_H - PICKER_HINGE_INSET;

    // Panel placement: centered on the anchor, preferring below it;
    // flipped above when below would overflow the viewport bottom, then
    // clamped to the margins.
    let left = (anchor.x - PICKER_PANEL_W / 2.0)
        .min(viewport.width - PICKER_PANEL_W - PICKER_EDGE_MARGIN)
        .max(PICKER_EDGE_MARGIN);
    let below = anchor.y + PICKER_ANCHOR_LIFT;
    let top = if below + PICKER_PANEL_H + PICKER_EDGE_MARGIN > viewport.height {
        anchor.y - (PICKER_PANEL_H + PICKER_ANCHOR_LIFT)
    } else {
        below
    };
    let top = top.min(viewport.height - PICKER_PANEL_H - PICKER_EDGE_MARGIN).max(PICKER_EDGE_MARGIN);

    let buttons = tiers
        .iter()
        .enumerate()
        .map(|(i, (tier_id, label))| {
            #[allow(clippy::cast_precision_loss)]
            let angle = PI - (i as f64) * step;
            let center = Point {
                x: left + hinge_x + radius * angle.cos(),
                y: top + hinge_y - radius * angle.sin(),
            };
            PickerButton { tier_id: *tier_id, label: button_label(label), center }
        })
        .collect();

    Ok(PickerLayout {
        origin: Point { x: left, y: top },
        width: PICKER_PANEL_W,
        height: PICKER_PANEL_H,
        buttons,
    })
}

/// First two characters of the tier label, uppercased; the placeholder
/// glyph when the label is empty.
fn button_label(label: &str) -> String {
    let short: String = label.chars().take(2).collect();
    if short.is_empty() {
        LABEL_PLACEHOLDER.to_string()
    } else {
        short.to_uppercase()
    }
}
