//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `materiality_core` linkage.
//! - Print a deterministic reference plot for a 600x400 surface.

use materiality_core::{pixel_to_score, score_to_pixel, PlotSurface};

fn main() {
    println!("materiality_core ping={}", materiality_core::ping());
    println!("materiality_core version={}", materiality_core::core_version());

    let surface = PlotSurface::new(600.0, 400.0);
    let pixel = score_to_pixel(9.2, 8.5, &surface);
    println!("score(9.2, 8.5) -> pixel({:.1}, {:.1})", pixel.x, pixel.y);
    match pixel_to_score(0.0, 0.0, &surface) {
        Some(point) => println!(
            "pixel(0, 0) -> score({}, {})",
            point.importance, point.impact
        ),
        None => println!("pixel(0, 0) -> deferred"),
    }
}
