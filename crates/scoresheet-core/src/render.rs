//! Render-description contract handed to the UI layer.
//!
//! The core never draws. It reports, per shape, what a renderer needs:
//! the polyline, corner markers, a style class, optional internal grid
//! dividers, and the id label. Pens, colors and marker sizes belong to the
//! rendering collaborator.

use crate::quad::{GridAxis, Quadrilateral};
use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};

/// Visual class of a shape; the renderer maps these to actual styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleClass {
    /// In-progress construction (open polyline).
    Drawing,
    /// Complete and currently selected.
    Selected,
    /// Complete, not selected.
    Unselected,
}

/// Grid subdivision settings, owned and validated by the settings panel.
///
/// The core treats the counts as opaque beyond the cells >= 1 rule in
/// [`Quadrilateral::grid_lines`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Number of cell rows per quadrilateral.
    pub rows: u32,
    /// Number of cell columns per quadrilateral.
    pub cols: u32,
    /// Whether internal grid dividers should be produced at all.
    pub show_cells: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        // Score sheets are typically 40 moves by 2 half-move columns.
        Self {
            rows: 40,
            cols: 2,
            show_cells: false,
        }
    }
}

/// Everything a renderer needs to draw one quadrilateral.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeSketch {
    /// Corner points in click order.
    pub polyline: Vec<Point>,
    /// Whether the polyline closes back to its first point.
    pub closed: bool,
    /// Marker positions (one per accepted corner).
    pub markers: Vec<Point>,
    /// Style class for the renderer to resolve.
    pub style: StyleClass,
    /// Internal grid dividers (rows then columns), present only when
    /// `show_cells` is set and the shape is complete.
    pub grid_lines: Vec<Line>,
    /// Id label (shown as id+1) and its anchor at the centroid.
    pub label: Option<(String, Point)>,
}

impl ShapeSketch {
    /// Build the sketch for one quadrilateral under the given settings.
    pub fn for_quad(quad: &Quadrilateral, settings: &GridSettings) -> Self {
        let style = if !quad.is_complete() {
            StyleClass::Drawing
        } else if quad.is_selected() {
            StyleClass::Selected
        } else {
            StyleClass::Unselected
        };

        let mut grid_lines = Vec::new();
        if settings.show_cells && quad.is_complete() {
            if let Some(rows) = quad.grid_lines(GridAxis::Rows, settings.rows) {
                grid_lines.extend(rows);
            }
            if let Some(cols) = quad.grid_lines(GridAxis::Columns, settings.cols) {
                grid_lines.extend(cols);
            }
        }

        let label = match (quad.id(), quad.centroid()) {
            (Some(id), Some(centroid)) => Some(((id + 1).to_string(), centroid)),
            _ => None,
        };

        Self {
            polyline: quad.points().to_vec(),
            closed: quad.is_complete(),
            markers: quad.points().to_vec(),
            style,
            grid_lines,
            label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_square() -> Quadrilateral {
        let mut quad = Quadrilateral::new();
        for p in [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ] {
            quad.append_point(p).unwrap();
        }
        quad
    }

    #[test]
    fn test_drawing_sketch() {
        let mut quad = Quadrilateral::new();
        quad.append_point(Point::new(0.0, 0.0)).unwrap();
        quad.append_point(Point::new(50.0, 0.0)).unwrap();

        let sketch = ShapeSketch::for_quad(&quad, &GridSettings::default());
        assert_eq!(sketch.style, StyleClass::Drawing);
        assert!(!sketch.closed);
        assert_eq!(sketch.polyline.len(), 2);
        assert_eq!(sketch.markers.len(), 2);
        assert!(sketch.grid_lines.is_empty());
        assert!(sketch.label.is_none());
    }

    #[test]
    fn test_complete_sketch_styles() {
        let mut quad = complete_square();
        let settings = GridSettings::default();

        let sketch = ShapeSketch::for_quad(&quad, &settings);
        assert_eq!(sketch.style, StyleClass::Unselected);
        assert!(sketch.closed);

        quad.selected = true;
        let sketch = ShapeSketch::for_quad(&quad, &settings);
        assert_eq!(sketch.style, StyleClass::Selected);
    }

    #[test]
    fn test_label_uses_one_based_id() {
        let mut quad = complete_square();
        quad.id = Some(2);

        let sketch = ShapeSketch::for_quad(&quad, &GridSettings::default());
        let (text, anchor) = sketch.label.expect("complete shape with id has a label");
        assert_eq!(text, "3");
        assert!((anchor.x - 5.0).abs() < 1e-9);
        assert!((anchor.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_grid_lines_follow_settings() {
        let quad = complete_square();
        let mut settings = GridSettings {
            rows: 4,
            cols: 2,
            show_cells: false,
        };

        let sketch = ShapeSketch::for_quad(&quad, &settings);
        assert!(sketch.grid_lines.is_empty());

        settings.show_cells = true;
        let sketch = ShapeSketch::for_quad(&quad, &settings);
        // 3 row dividers + 1 column divider.
        assert_eq!(sketch.grid_lines.len(), 4);
    }
}
