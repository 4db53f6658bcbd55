//! Scoresheet Core Library
//!
//! UI-agnostic geometry and interaction core for annotating chess score
//! sheet images with convex quadrilateral regions.

pub mod annotator;
pub mod error;
pub mod geometry;
pub mod input;
pub mod quad;
pub mod render;

pub use annotator::{Annotator, CursorHint, Mode, PointerOutcome};
pub use error::{GeometryError, GeometryResult};
pub use input::{KeyEvent, MouseButton, PointerEvent};
pub use quad::{CornerRole, GridAxis, Quadrilateral, CLOSE_POINT_DISTANCE, NB_SIDES};
pub use render::{GridSettings, ShapeSketch, StyleClass};
