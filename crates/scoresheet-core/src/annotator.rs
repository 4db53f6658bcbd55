//! Interaction state machine over a collection of quadrilaterals.
//!
//! Routes pointer and key events into either "append a construction point",
//! "drag a corner", "drag a whole shape", or "change selection", and keeps
//! dense sequential ids across deletions. All mutation is synchronous; the
//! host pulls [`ShapeSketch`]es once per frame.

use crate::error::{GeometryError, GeometryResult};
use crate::input::{KeyEvent, MouseButton, PointerEvent};
use crate::quad::Quadrilateral;
use crate::render::{GridSettings, ShapeSketch};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Interaction mode. Panning is not a mode of its own: in edit mode a click
/// that hits nothing is reported as [`PointerOutcome::PanPassthrough`] and
/// left to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Click-construct a new quadrilateral point by point.
    Draw,
    /// Select, drag corners, drag whole shapes, delete.
    #[default]
    Edit,
}

/// Transient pointer-drag state. Never non-idle without a selection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Dragging one corner of the selected shape.
    Corner(usize),
    /// Dragging the whole selected shape; carries the last pointer position
    /// so the drag is incremental.
    Shape(Point),
}

/// What a pointer-down/up event did, so the host can react (or pan).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerOutcome {
    /// A construction point was accepted.
    PointAdded,
    /// A construction point was rejected and the shape is unchanged.
    PointRejected(GeometryError),
    /// The in-progress quadrilateral completed and was stored under this id.
    Completed(usize),
    /// The in-progress quadrilateral was discarded.
    DrawingCancelled,
    /// Selection changed to this shape.
    Selected(usize),
    /// A corner drag started on the selected shape.
    CornerDragStarted(usize),
    /// A whole-shape drag started on the selected shape.
    ShapeDragStarted,
    /// Nothing was hit; the host may treat the gesture as pan/scroll.
    PanPassthrough,
    /// Hover update only; carries the suggested cursor.
    Hover(CursorHint),
    /// An active drag finished.
    DragEnded,
    /// The event has no effect in the current mode.
    Ignored,
}

/// Cursor suggestion while hovering in edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorHint {
    Default,
    /// Over the selected shape's body or near one of its corners.
    Grab,
}

/// The collection of quadrilaterals drawn over one score sheet image,
/// together with selection, drawing and drag state.
#[derive(Debug, Clone, Default)]
pub struct Annotator {
    /// Completed quadrilaterals; ids are dense and equal their position.
    quads: Vec<Quadrilateral>,
    /// Index of the selected quadrilateral, if any.
    selected: Option<usize>,
    /// Quadrilateral under construction (draw mode only).
    in_progress: Option<Quadrilateral>,
    /// Active drag (edit mode only).
    drag: DragState,
    /// Current interaction mode.
    mode: Mode,
    /// Grid subdivision settings from the settings panel.
    settings: GridSettings,
}

impl Annotator {
    /// Create an empty annotator in edit mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current interaction mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of completed quadrilaterals.
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// Whether the collection holds no completed quadrilaterals.
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// All completed quadrilaterals in id order.
    pub fn quads(&self) -> &[Quadrilateral] {
        &self.quads
    }

    /// Id of the selected quadrilateral, if any.
    pub fn selected_id(&self) -> Option<usize> {
        self.selected
    }

    /// The selected quadrilateral, if any.
    pub fn selected_quad(&self) -> Option<&Quadrilateral> {
        self.selected.map(|id| &self.quads[id])
    }

    /// Current grid settings.
    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    /// Replace the grid settings (already validated by the settings panel).
    pub fn set_settings(&mut self, settings: GridSettings) {
        self.settings = settings;
    }

    /// Switch interaction mode, discarding any in-progress drawing,
    /// selection and drag. Completed shapes are kept.
    pub fn set_mode(&mut self, mode: Mode) {
        log::debug!("mode switch to {:?}", mode);
        self.mode = mode;
        self.in_progress = None;
        self.set_selection(None);
    }

    /// A new image was loaded: drop all annotation state.
    pub fn image_loaded(&mut self) {
        self.reset();
    }

    /// The image was closed: drop all annotation state.
    pub fn image_closed(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        log::debug!("resetting annotator ({} shapes dropped)", self.quads.len());
        self.quads.clear();
        self.in_progress = None;
        self.set_selection(None);
        self.mode = Mode::Edit;
    }

    /// Dispatch a pointer event to the current mode.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) -> PointerOutcome {
        match *event {
            PointerEvent::Down { position, button } => self.pointer_down(position, button),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { .. } => self.pointer_up(),
        }
    }

    /// Handle a key press. Returns true when the key was consumed
    /// (Delete/Backspace with a selection present).
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> bool {
        match event {
            KeyEvent::Pressed(key) if matches!(key.as_str(), "Delete" | "Backspace") => {
                self.delete_selected().is_ok()
            }
            _ => false,
        }
    }

    /// Pointer-down routing per the current mode.
    pub fn pointer_down(&mut self, position: Point, button: MouseButton) -> PointerOutcome {
        match self.mode {
            Mode::Draw => self.draw_pointer_down(position, button),
            Mode::Edit => self.edit_pointer_down(position, button),
        }
    }

    fn draw_pointer_down(&mut self, position: Point, button: MouseButton) -> PointerOutcome {
        match button {
            MouseButton::Left => {
                let quad = self.in_progress.get_or_insert_with(Quadrilateral::new);
                if let Err(err) = quad.append_point(position) {
                    return PointerOutcome::PointRejected(err);
                }
                match self.in_progress.take_if(|quad| quad.is_complete()) {
                    Some(mut quad) => {
                        let id = self.quads.len();
                        quad.id = Some(id);
                        self.quads.push(quad);
                        self.mode = Mode::Edit;
                        log::debug!("quadrilateral {} completed", id);
                        PointerOutcome::Completed(id)
                    }
                    None => PointerOutcome::PointAdded,
                }
            }
            MouseButton::Right => {
                if self.in_progress.take().is_some() {
                    PointerOutcome::DrawingCancelled
                } else {
                    PointerOutcome::Ignored
                }
            }
            MouseButton::Middle => PointerOutcome::Ignored,
        }
    }

    fn edit_pointer_down(&mut self, position: Point, button: MouseButton) -> PointerOutcome {
        if button != MouseButton::Left {
            return PointerOutcome::Ignored;
        }

        // A corner of the selected shape wins over any body hit.
        if let Some(sel) = self.selected {
            if let Some(corner) = self.quads[sel].find_close_corner(position) {
                self.drag = DragState::Corner(corner);
                return PointerOutcome::CornerDragStarted(corner);
            }
        }

        match self.quad_at(position) {
            Some(hit) if Some(hit) == self.selected => {
                self.drag = DragState::Shape(position);
                PointerOutcome::ShapeDragStarted
            }
            Some(hit) => {
                self.set_selection(Some(hit));
                PointerOutcome::Selected(hit)
            }
            None => PointerOutcome::PanPassthrough,
        }
    }

    /// Pointer-move: applies the active drag, otherwise reports a hover
    /// cursor hint. Geometric rejections during drags are silently ignored;
    /// the corner simply refuses to move past where the shape would invert.
    pub fn pointer_move(&mut self, position: Point) -> PointerOutcome {
        if self.mode == Mode::Draw {
            // Reserved for a live construction preview.
            return PointerOutcome::Hover(CursorHint::Default);
        }

        match self.drag {
            DragState::Corner(corner) => {
                if let Some(sel) = self.selected {
                    let _ = self.quads[sel].update_point(corner, position);
                }
                PointerOutcome::Hover(CursorHint::Grab)
            }
            DragState::Shape(anchor) => {
                if let Some(sel) = self.selected {
                    let _ = self.quads[sel].move_by(position - anchor);
                }
                self.drag = DragState::Shape(position);
                PointerOutcome::Hover(CursorHint::Grab)
            }
            DragState::Idle => {
                let hint = match self.selected_quad() {
                    Some(quad)
                        if quad.contains_point(position)
                            || quad.find_close_corner(position).is_some() =>
                    {
                        CursorHint::Grab
                    }
                    _ => CursorHint::Default,
                };
                PointerOutcome::Hover(hint)
            }
        }
    }

    /// Pointer-up: ends any active drag; selection is untouched.
    pub fn pointer_up(&mut self) -> PointerOutcome {
        if self.drag == DragState::Idle {
            PointerOutcome::Ignored
        } else {
            self.drag = DragState::Idle;
            PointerOutcome::DragEnded
        }
    }

    /// Delete the selected quadrilateral.
    pub fn delete_selected(&mut self) -> GeometryResult<()> {
        let id = self.selected.ok_or(GeometryError::InvalidState)?;
        self.delete(id)
    }

    /// Delete the quadrilateral with the given id.
    ///
    /// Clears selection and drag unconditionally, even when the deleted
    /// shape was not the selected one, and re-derives dense ids for the
    /// remaining shapes.
    pub fn delete(&mut self, id: usize) -> GeometryResult<()> {
        if id >= self.quads.len() {
            return Err(GeometryError::BadIndex);
        }

        self.quads.remove(id);
        self.set_selection(None);
        for (pos, quad) in self.quads.iter_mut().enumerate() {
            quad.id = Some(pos);
        }
        log::debug!("deleted quadrilateral {}, {} remaining", id, self.quads.len());
        Ok(())
    }

    /// Render descriptions for all shapes, completed ones first and the
    /// in-progress drawing (if any) last.
    pub fn sketches(&self) -> Vec<ShapeSketch> {
        self.quads
            .iter()
            .chain(self.in_progress.as_ref())
            .map(|quad| ShapeSketch::for_quad(quad, &self.settings))
            .collect()
    }

    /// Topmost quadrilateral containing `point`, preferring the current
    /// selection when it also contains the point.
    fn quad_at(&self, point: Point) -> Option<usize> {
        if let Some(sel) = self.selected {
            if self.quads[sel].contains_point(point) {
                return Some(sel);
            }
        }
        self.quads.iter().position(|quad| quad.contains_point(point))
    }

    /// Move the selection, keeping the per-shape flags in sync and clearing
    /// any drag; at most one shape is ever selected.
    fn set_selection(&mut self, id: Option<usize>) {
        self.drag = DragState::Idle;
        for quad in &mut self.quads {
            quad.selected = false;
        }
        if let Some(id) = id {
            self.quads[id].selected = true;
        }
        self.selected = id;
    }
}
