//! Canvas interaction functionality.
//!
//! This module maps pointer positions between screen and grid space and turns
//! clicks and drags on the canvas into store operations.

use super::state::{DiagramApp, DragTarget};
use crate::constants::{OBJECT_RADIUS, PICK_TOLERANCE};
use crate::coordinates::{canvas_to_grid, grid_to_canvas, CanvasDimensions, GridPoint};
use crate::dimensions::DimensionsError;
use crate::types::*;
use eframe::egui;
use log::debug;

impl DiagramApp {
    /// Current canvas dimensions of this session.
    ///
    /// # Returns
    ///
    /// The provided dimensions, or `DimensionsError::NotProvided` before the
    /// canvas has been laid out once.
    pub fn canvas_dimensions(&self) -> Result<CanvasDimensions, DimensionsError> {
        Ok(self.dimensions.use_dimensions()?.snapshot())
    }

    /// Converts a grid position to a screen position.
    pub fn grid_to_screen(&self, point: GridPoint, dims: &CanvasDimensions) -> egui::Pos2 {
        let canvas = grid_to_canvas(point.x, point.y, dims);
        self.canvas.origin + egui::vec2(canvas.x, canvas.y)
    }

    /// Converts a screen position to a grid position.
    pub fn screen_to_grid(&self, pos: egui::Pos2, dims: &CanvasDimensions) -> GridPoint {
        let local = pos - self.canvas.origin;
        canvas_to_grid(local.x, local.y, dims)
    }

    /// Finds the topmost object under a grid position.
    pub fn find_object_at(&self, point: GridPoint) -> Option<ObjectId> {
        self.diagram
            .objects()
            .iter()
            .rev()
            .find(|obj| distance(obj.position(), point) <= OBJECT_RADIUS)
            .map(|obj| obj.id)
    }

    /// Finds the vector whose head is under a grid position.
    pub fn find_vector_head_at(&self, point: GridPoint) -> Option<VectorId> {
        self.vectors
            .vectors()
            .iter()
            .rev()
            .find(|v| distance(v.head, point) <= PICK_TOLERANCE)
            .map(|v| v.id)
    }

    /// Finds the vector whose shaft passes under a grid position.
    pub fn find_vector_at(&self, point: GridPoint) -> Option<VectorId> {
        self.vectors
            .vectors()
            .iter()
            .rev()
            .find(|v| point_to_segment_distance(point, v.tail, v.head) <= PICK_TOLERANCE)
            .map(|v| v.id)
    }

    /// Double click: empty space adds an object, an object starts label editing.
    pub fn handle_double_click(&mut self, point: GridPoint) {
        // Undo the selection toggle made by the first click of the pair
        if let Some(id) = self.gesture.last_click_toggle.take() {
            let _ = self.diagram.toggle_object_selection(id);
        }
        match self.find_object_at(point) {
            Some(id) => self.start_editing_label(id),
            None => {
                let id = self.diagram.add_object(point.x.round(), point.y.round());
                self.start_editing_label(id);
            }
        }
    }

    /// Single click: toggles an object's selection or highlights a vector.
    /// Clicking empty space clears both.
    pub fn handle_click(&mut self, point: GridPoint) {
        self.gesture.last_click_toggle = None;
        if let Some(id) = self.find_object_at(point) {
            let _ = self.diagram.toggle_object_selection(id);
            self.gesture.last_click_toggle = Some(id);
        } else if let Some(id) = self.find_vector_at(point) {
            if self.vectors.highlighted_vector_id() == Some(id) {
                self.vectors.clear_highlighted_vector();
            } else {
                self.vectors.set_highlighted_vector(id);
            }
        } else {
            self.diagram.clear_selection();
            self.vectors.clear_highlighted_vector();
        }
    }

    /// Starts a drag gesture.
    ///
    /// A vector head under the pointer is dragged first. Otherwise shift-drag
    /// draws a new vector (attached to the object under the pointer, if any)
    /// and a plain drag moves the object under the pointer.
    pub fn begin_drag(&mut self, point: GridPoint, shift: bool) {
        self.gesture.last_drag_pos = Some(point);
        if let Some(id) = self.find_vector_head_at(point) {
            self.gesture.drag = Some(DragTarget::VectorHead(id));
            return;
        }

        let object = self.find_object_at(point);
        if shift {
            let tail = object
                .and_then(|id| self.diagram.object(id))
                .map(|obj| obj.position())
                .unwrap_or(point);
            let mut vector =
                ForceVector::new(tail, point).with_label(self.gesture.new_vector_label.clone());
            if let Some(id) = object {
                vector = vector.on_object(id);
            }
            let id = vector.id;
            self.vectors.add_vector(vector);
            self.vectors.set_highlighted_vector(id);
            self.gesture.drag = Some(DragTarget::NewVector(id));
        } else {
            self.gesture.drag = object.map(DragTarget::Object);
        }
    }

    /// Continues the current drag to a new pointer position.
    pub fn continue_drag(&mut self, point: GridPoint) {
        let Some(last) = self.gesture.last_drag_pos else {
            return;
        };
        match self.gesture.drag {
            Some(DragTarget::Object(id)) => {
                let (dx, dy) = (point.x - last.x, point.y - last.y);
                if let Some(obj) = self.diagram.object(id) {
                    let (x, y) = (obj.x + dx, obj.y + dy);
                    let _ = self.diagram.update_object_position(id, x, y);
                    self.move_attached_vectors(id, dx, dy);
                }
            }
            Some(DragTarget::VectorHead(id) | DragTarget::NewVector(id)) => {
                let _ = self.vectors.update_vector_head(id, point);
            }
            None => {}
        }
        self.gesture.last_drag_pos = Some(point);
    }

    /// Ends the current drag. A vector drawn by this drag is discarded if it
    /// was left with zero length; existing vectors are always kept.
    pub fn end_drag(&mut self) {
        if let Some(DragTarget::NewVector(id)) = self.gesture.drag {
            if self.vectors.vector(id).is_some_and(|v| v.magnitude() < 1.0) {
                debug!("Discarding zero-length vector {}", id);
                let _ = self.vectors.delete_vector(id);
                self.vectors.clear_highlighted_vector();
            }
        }
        self.gesture.drag = None;
        self.gesture.last_drag_pos = None;
    }

    fn move_attached_vectors(&mut self, object_id: ObjectId, dx: f32, dy: f32) {
        let moved: Vec<ForceVector> = self
            .vectors
            .vectors_for_object(object_id)
            .map(|v| {
                let mut v = v.clone();
                v.tail = GridPoint::new(v.tail.x + dx, v.tail.y + dy);
                v.head = GridPoint::new(v.head.x + dx, v.head.y + dy);
                v
            })
            .collect();
        for vector in moved {
            let _ = self.vectors.update_vector(vector);
        }
    }

    /// Handles all pointer input on the canvas for one frame.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The response from the canvas widget
    /// * `dims` - Canvas dimensions provided for this frame
    pub fn handle_canvas_pointer(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        dims: &CanvasDimensions,
    ) {
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        let point = self.screen_to_grid(pos, dims);
        let shift = ui.input(|i| i.modifiers.shift);

        if response.double_clicked() {
            self.handle_double_click(point);
        } else if response.clicked() {
            self.handle_click(point);
        }

        if response.drag_started() {
            // Start from where the press happened, not where the drag threshold was crossed.
            let press = ui
                .input(|i| i.pointer.press_origin())
                .map(|p| self.screen_to_grid(p, dims))
                .unwrap_or(point);
            self.begin_drag(press, shift);
        }
        if response.dragged() {
            self.continue_drag(point);
        }
        if response.drag_stopped() {
            self.end_drag();
        }
    }
}

fn distance(a: GridPoint, b: GridPoint) -> f32 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Calculates the distance from a point to a line segment.
fn point_to_segment_distance(point: GridPoint, start: GridPoint, end: GridPoint) -> f32 {
    let (dx, dy) = (end.x - start.x, end.y - start.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return distance(point, start);
    }
    let t = (((point.x - start.x) * dx + (point.y - start.y) * dy) / len_sq).clamp(0.0, 1.0);
    distance(point, GridPoint::new(start.x + t * dx, start.y + t * dy))
}
