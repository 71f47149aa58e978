//! Render model for the matrix presentation layer.
//!
//! Builds plain positioned records from store and controller state so the
//! UI only draws; no layout math happens on the UI side.

use crate::interaction::controller::InteractionController;
use crate::mapper::{score_to_pixel, PixelPoint, PlotSurface};
use crate::model::category::CategoryCatalog;
use crate::model::quadrant::Quadrant;
use crate::model::score::{ScorePoint, SCORE_MAX};
use crate::model::topic::TopicId;
use crate::store::filter::TopicFilter;
use crate::store::topic_store::TopicStore;

/// One dot ready for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedTopic {
    pub id: TopicId,
    pub title: String,
    pub position: ScorePoint,
    pub pixel: PixelPoint,
    pub color: String,
    pub quadrant: Quadrant,
    pub hovered: bool,
    pub selected: bool,
    pub dragging: bool,
}

/// Grid line orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    /// Constant importance, drawn top to bottom.
    Vertical,
    /// Constant impact, drawn left to right.
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub axis: GridAxis,
    /// Score value the line marks (0..=10).
    pub score: f64,
    /// Pixel offset along the perpendicular axis.
    pub offset: f64,
}

/// Maps filtered topics to pixel positions with interaction flags.
pub fn plot_topics(
    store: &TopicStore,
    catalog: &CategoryCatalog,
    controller: &InteractionController,
    surface: &PlotSurface,
    filter: &TopicFilter,
) -> Vec<PlottedTopic> {
    let state = controller.state();
    store
        .list_topics(|topic| filter.matches(topic))
        .into_iter()
        .map(|topic| {
            let position = topic.position();
            PlottedTopic {
                id: topic.id,
                title: topic.title.clone(),
                position,
                pixel: score_to_pixel(
                    position.importance.value(),
                    position.impact.value(),
                    surface,
                ),
                color: catalog.color_of(&topic.category).to_string(),
                quadrant: Quadrant::classify(position, filter.quadrant_split),
                hovered: state.hovered_topic() == Some(topic.id),
                selected: controller.selected() == Some(topic.id),
                dragging: state.dragged_topic() == Some(topic.id),
            }
        })
        .collect()
}

/// Integer score grid lines, or none when the grid is hidden.
pub fn grid_lines(surface: &PlotSurface, show_grid: bool) -> Vec<GridLine> {
    if !show_grid || surface.is_degenerate() {
        return Vec::new();
    }

    let steps = SCORE_MAX as u32;
    let mut lines = Vec::with_capacity(2 * (steps as usize + 1));
    for step in 0..=steps {
        let score = f64::from(step);
        let pixel = score_to_pixel(score, score, surface);
        lines.push(GridLine {
            axis: GridAxis::Vertical,
            score,
            offset: pixel.x,
        });
        lines.push(GridLine {
            axis: GridAxis::Horizontal,
            score,
            offset: pixel.y,
        });
    }
    lines
}
