//! Canvas rendering functionality for objects, interaction arcs, vectors and grid.
//!
//! Everything is stored in grid coordinates and converted to screen positions
//! through the coordinate helpers at draw time.

use super::state::DiagramApp;
use crate::constants::{GRID_SIZE, OBJECT_RADIUS, VECTOR_ARROW_SIZE};
use crate::coordinates::{CanvasDimensions, GridPoint};
use crate::labels::ForceLabel;
use crate::types::*;
use eframe::egui;

/// Number of straight segments used to approximate an arc.
const ARC_SEGMENTS: usize = 24;

impl DiagramApp {
    /// Renders all diagram elements on the canvas.
    ///
    /// Elements are drawn in layers: grid first, then interaction arcs, then
    /// objects, and vectors on top.
    pub fn render_diagram(
        &self,
        painter: &egui::Painter,
        canvas_rect: egui::Rect,
        dims: &CanvasDimensions,
    ) {
        if self.canvas.show_grid {
            self.draw_grid(painter, canvas_rect, dims);
        }

        for interaction in self.diagram.interactions() {
            self.draw_interaction(painter, interaction, dims);
        }

        for object in self.diagram.objects() {
            self.draw_object(painter, object, dims);
        }

        let highlighted = self.vectors.highlighted_vector_id();
        for vector in self.vectors.vectors() {
            self.draw_vector(painter, vector, highlighted == Some(vector.id), dims);
        }
    }

    /// Draws grid lines every `GRID_SIZE` units and stronger axes through the grid origin.
    pub fn draw_grid(&self, painter: &egui::Painter, canvas_rect: egui::Rect, dims: &CanvasDimensions) {
        let stroke = egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(128, 128, 128, 32));
        let axis_stroke =
            egui::Stroke::new(1.5, egui::Color32::from_rgba_unmultiplied(128, 128, 128, 110));
        let origin = self.grid_to_screen(GridPoint::new(0.0, 0.0), dims);

        // Walk outwards from the origin so the axes always land on a grid line
        let mut offset = 0.0;
        while origin.x - offset >= canvas_rect.min.x || origin.x + offset <= canvas_rect.max.x {
            for x in [origin.x - offset, origin.x + offset] {
                if x >= canvas_rect.min.x && x <= canvas_rect.max.x {
                    painter.line_segment(
                        [egui::pos2(x, canvas_rect.min.y), egui::pos2(x, canvas_rect.max.y)],
                        if offset == 0.0 { axis_stroke } else { stroke },
                    );
                }
            }
            offset += GRID_SIZE;
        }

        let mut offset = 0.0;
        while origin.y - offset >= canvas_rect.min.y || origin.y + offset <= canvas_rect.max.y {
            for y in [origin.y - offset, origin.y + offset] {
                if y >= canvas_rect.min.y && y <= canvas_rect.max.y {
                    painter.line_segment(
                        [egui::pos2(canvas_rect.min.x, y), egui::pos2(canvas_rect.max.x, y)],
                        if offset == 0.0 { axis_stroke } else { stroke },
                    );
                }
            }
            offset += GRID_SIZE;
        }
    }

    /// Screen-space points approximating an interaction arc.
    ///
    /// The arc bulges `arc_height` pixels away from the straight line between
    /// the two objects. Both directions of a pair bulge to the same side so
    /// stacked arcs never cross.
    pub fn interaction_arc_points(
        &self,
        interaction: &Interaction,
        dims: &CanvasDimensions,
    ) -> Option<Vec<egui::Pos2>> {
        let from = self.diagram.object(interaction.from_object_id)?;
        let to = self.diagram.object(interaction.to_object_id)?;
        let (first, second) = if from.id <= to.id { (from, to) } else { (to, from) };
        let start = self.grid_to_screen(first.position(), dims);
        let end = self.grid_to_screen(second.position(), dims);

        let chord = end - start;
        let length = chord.length();
        if length < f32::EPSILON {
            return None;
        }
        let normal = egui::vec2(-chord.y, chord.x) / length;
        // A quadratic curve peaks halfway towards its control point
        let control = start + chord * 0.5 + normal * (interaction.arc_height * 2.0);

        Some(
            (0..=ARC_SEGMENTS)
                .map(|step| {
                    let t = step as f32 / ARC_SEGMENTS as f32;
                    let u = 1.0 - t;
                    let p = start.to_vec2() * (u * u)
                        + control.to_vec2() * (2.0 * u * t)
                        + end.to_vec2() * (t * t);
                    p.to_pos2()
                })
                .collect(),
        )
    }

    /// Draws one interaction arc with its label at the peak.
    pub fn draw_interaction(
        &self,
        painter: &egui::Painter,
        interaction: &Interaction,
        dims: &CanvasDimensions,
    ) {
        let Some(points) = self.interaction_arc_points(interaction, dims) else {
            return;
        };
        let color = egui::Color32::from_rgb(100, 150, 255);
        let peak = points[points.len() / 2];
        painter.add(egui::Shape::line(points, egui::Stroke::new(2.0, color)));
        painter.text(
            peak,
            egui::Align2::CENTER_BOTTOM,
            ForceLabel::parse(&interaction.label).to_plain(),
            egui::FontId::proportional(13.0),
            color,
        );
    }

    /// Draws an object as a labelled circle, outlined when selected.
    pub fn draw_object(&self, painter: &egui::Painter, object: &DiagramObject, dims: &CanvasDimensions) {
        let center = self.grid_to_screen(object.position(), dims);
        let fill = if object.is_editing {
            egui::Color32::from_rgb(90, 90, 60)
        } else {
            egui::Color32::from_rgb(60, 60, 70)
        };
        painter.circle_filled(center, OBJECT_RADIUS, fill);

        let stroke = if object.selected {
            egui::Stroke::new(3.0, egui::Color32::from_rgb(255, 200, 60))
        } else {
            egui::Stroke::new(1.5, egui::Color32::GRAY)
        };
        painter.circle_stroke(center, OBJECT_RADIUS, stroke);

        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            &object.label,
            egui::FontId::proportional(12.0),
            egui::Color32::WHITE,
        );
    }

    /// Draws a force vector as an arrow with its label next to the tip.
    pub fn draw_vector(
        &self,
        painter: &egui::Painter,
        vector: &ForceVector,
        highlighted: bool,
        dims: &CanvasDimensions,
    ) {
        let tail = self.grid_to_screen(vector.tail, dims);
        let head = self.grid_to_screen(vector.head, dims);
        let (color, width) = if highlighted {
            (egui::Color32::from_rgb(255, 120, 80), 3.5)
        } else {
            (egui::Color32::from_rgb(230, 90, 60), 2.0)
        };
        let stroke = egui::Stroke::new(width, color);

        let shaft = head - tail;
        let length = shaft.length();
        if length < f32::EPSILON {
            return;
        }
        let dir = shaft / length;
        let normal = egui::vec2(-dir.y, dir.x);
        let back = head - dir * VECTOR_ARROW_SIZE;

        painter.line_segment([tail, back], stroke);
        painter.add(egui::Shape::convex_polygon(
            vec![
                head,
                back + normal * (VECTOR_ARROW_SIZE * 0.5),
                back - normal * (VECTOR_ARROW_SIZE * 0.5),
            ],
            color,
            egui::Stroke::NONE,
        ));

        if !vector.label.is_empty() {
            painter.text(
                head + dir * 6.0,
                egui::Align2::LEFT_CENTER,
                ForceLabel::parse(&vector.label).to_plain(),
                egui::FontId::proportional(12.0),
                color,
            );
        }
    }
}
