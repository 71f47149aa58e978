//! Score <-> pixel coordinate mapping for the matrix plot surface.
//!
//! # Responsibility
//! - Convert `(importance, impact)` scores into plot pixel positions.
//! - Convert pointer positions back into committed scores.
//!
//! # Invariants
//! - Importance grows left to right; impact grows bottom to top, so pixel
//!   `y` is inverted relative to impact.
//! - A fixed margin insets the plotting rectangle on every side.
//! - Output scores are always inside `[0, 10]`, even for pointer
//!   positions outside the surface.
//! - No division is performed on a degenerate surface.

use crate::model::score::{ScorePoint, SCORE_MAX};
use serde::{Deserialize, Serialize};

/// Inset between the container edge and the plotting rectangle.
pub const DEFAULT_MARGIN: f64 = 20.0;

/// Pixel position inside the plot container, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Measured plot container. Recomputed on every layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotSurface {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl PlotSurface {
    /// Surface with the default 20px margin.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_margin(width, height, DEFAULT_MARGIN)
    }

    pub fn with_margin(width: f64, height: f64, margin: f64) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Placeholder used before the container has been measured.
    pub fn unmeasured() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Usable horizontal span, `None` when not strictly positive.
    pub fn plot_width(&self) -> Option<f64> {
        plot_span(self.width, self.margin)
    }

    /// Usable vertical span, `None` when not strictly positive.
    pub fn plot_height(&self) -> Option<f64> {
        plot_span(self.height, self.margin)
    }

    /// True when either axis has no usable span.
    pub fn is_degenerate(&self) -> bool {
        self.plot_width().is_none() || self.plot_height().is_none()
    }

    fn effective_margin(&self) -> f64 {
        if self.margin.is_finite() && self.margin > 0.0 {
            self.margin
        } else {
            0.0
        }
    }
}

fn plot_span(dimension: f64, margin: f64) -> Option<f64> {
    let margin = if margin.is_finite() && margin > 0.0 {
        margin
    } else {
        0.0
    };
    let span = dimension - 2.0 * margin;
    (dimension.is_finite() && span.is_finite() && span > 0.0).then_some(span)
}

/// Maps a score pair to its pixel position.
///
/// Input scores are clamped first. On a degenerate axis the point is
/// placed at the container center for that axis (or `0` when unmeasured).
pub fn score_to_pixel(importance: f64, impact: f64, surface: &PlotSurface) -> PixelPoint {
    let point = ScorePoint::new(importance, impact);
    let margin = surface.effective_margin();

    let x = match surface.plot_width() {
        Some(span) => (point.importance.value() / SCORE_MAX) * span + margin,
        None => degenerate_center(surface.width),
    };
    let y = match surface.plot_height() {
        Some(span) => surface.height - ((point.impact.value() / SCORE_MAX) * span + margin),
        None => degenerate_center(surface.height),
    };

    PixelPoint { x, y }
}

/// Maps a pixel position to a committed score pair.
///
/// The result is clamped into `[0, 10]` and rounded to one decimal place.
/// Returns `None` on a degenerate surface so callers can defer the commit.
pub fn pixel_to_score(x: f64, y: f64, surface: &PlotSurface) -> Option<ScorePoint> {
    pixel_to_score_preview(x, y, surface).map(ScorePoint::rounded)
}

/// Like [`pixel_to_score`] but without rounding, for live drag feedback.
pub fn pixel_to_score_preview(x: f64, y: f64, surface: &PlotSurface) -> Option<ScorePoint> {
    let plot_width = surface.plot_width()?;
    let plot_height = surface.plot_height()?;
    let margin = surface.effective_margin();

    let importance = (x - margin) / plot_width * SCORE_MAX;
    let impact = (surface.height - y - margin) / plot_height * SCORE_MAX;
    Some(ScorePoint::new(importance, impact))
}

fn degenerate_center(dimension: f64) -> f64 {
    if dimension.is_finite() && dimension > 0.0 {
        dimension / 2.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{pixel_to_score, pixel_to_score_preview, score_to_pixel, PlotSurface};

    #[test]
    fn plot_spans_exclude_margins() {
        let surface = PlotSurface::new(600.0, 400.0);
        assert_eq!(surface.plot_width(), Some(560.0));
        assert_eq!(surface.plot_height(), Some(360.0));
        assert!(!surface.is_degenerate());
    }

    #[test]
    fn surface_no_wider_than_margins_is_degenerate() {
        assert!(PlotSurface::new(40.0, 400.0).is_degenerate());
        assert!(PlotSurface::new(600.0, f64::NAN).is_degenerate());
        assert!(PlotSurface::unmeasured().is_degenerate());
    }

    #[test]
    fn degenerate_surface_yields_defined_values() {
        let surface = PlotSurface::new(0.0, 0.0);
        let pixel = score_to_pixel(5.0, 5.0, &surface);
        assert_eq!((pixel.x, pixel.y), (0.0, 0.0));
        assert_eq!(pixel_to_score(10.0, 10.0, &surface), None);
        assert_eq!(pixel_to_score_preview(10.0, 10.0, &surface), None);
    }

    #[test]
    fn corners_map_to_margin_inset() {
        let surface = PlotSurface::new(600.0, 400.0);
        let bottom_left = score_to_pixel(0.0, 0.0, &surface);
        assert_eq!((bottom_left.x, bottom_left.y), (20.0, 380.0));
        let top_right = score_to_pixel(10.0, 10.0, &surface);
        assert_eq!((top_right.x, top_right.y), (580.0, 20.0));
    }

    #[test]
    fn preview_is_clamped_but_not_rounded() {
        let surface = PlotSurface::new(600.0, 400.0);
        let preview = pixel_to_score_preview(300.0, 200.0, &surface).unwrap();
        assert!((preview.importance.value() - 5.0).abs() < 1e-9);
        assert!((preview.impact.value() - 5.0).abs() < 1e-9);

        let offset = pixel_to_score_preview(303.0, 200.0, &surface).unwrap();
        assert!(offset.importance.value() > 5.05);
        assert!(offset.importance.value() < 5.06);
    }
}
