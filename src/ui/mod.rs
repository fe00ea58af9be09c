//! User interface components and rendering logic for the force diagram tool.
//!
//! This module contains all the UI-related code including the main application struct,
//! canvas rendering, the properties panel and user interaction handling.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main DiagramApp
//! - `canvas` - Coordinate mapping, hit testing and pointer gestures
//! - `rendering` - Drawing objects, interaction arcs, vectors and grid

mod canvas;
mod rendering;
mod state;

pub use state::DiagramApp;

use crate::diagram::InteractionDiagram;
use crate::labels::ForceLabel;
use crate::presets::all_presets;
use crate::types::*;
use crate::vectors::ForceVectors;
use eframe::egui;
use log::{debug, error};
use serde::Serialize;

/// What "Copy JSON" puts on the clipboard.
#[derive(Serialize)]
struct DiagramSnapshot<'a> {
    diagram: &'a InteractionDiagram,
    vectors: &'a ForceVectors,
}

impl eframe::App for DiagramApp {
    /// Main update function called by egui for each frame.
    ///
    /// Lays out the toolbar, the properties panel and the canvas, and handles
    /// keyboard shortcuts.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.handle_delete_key(ctx);

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.draw_status_bar(ui);
        });

        egui::SidePanel::right("properties_panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.draw_properties_panel(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_canvas(ui);
        });
    }
}

impl DiagramApp {
    fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.label("Add interaction:");
            for kind in self.diagram.interaction_types() {
                let enabled = self.diagram.selected_objects().len() == 2;
                let button = ui.add_enabled(enabled, egui::Button::new(kind.text));
                if button.on_hover_text(kind.value).clicked() {
                    self.add_interaction_of(kind);
                }
            }

            let mut annotate = self.diagram.label_style() == LabelStyle::AnnotateTarget;
            if ui
                .checkbox(&mut annotate, "Name target")
                .on_hover_text("Append the second object's label to the force subscript")
                .changed()
            {
                self.diagram.set_label_style(if annotate {
                    LabelStyle::AnnotateTarget
                } else {
                    LabelStyle::Plain
                });
            }

            ui.separator();

            if ui.button("Clear selection").clicked() {
                self.diagram.clear_selection();
            }
            if ui.button("Delete selected").clicked() {
                self.delete_selected();
            }
            if ui.button("Clear vectors").clicked() {
                self.vectors.clear_vectors();
                self.vectors.clear_highlighted_vector();
            }
            if ui.button("Clear all").clicked() {
                self.clear_all();
            }

            ui.separator();

            ui.menu_button("Presets", |ui| {
                for info in all_presets() {
                    if ui.button(info.name).clicked() {
                        self.load_preset(info.kind);
                        ui.close();
                    }
                }
            });
            if ui.button("Copy JSON").clicked() {
                self.copy_diagram_json(ui.ctx());
            }
            ui.checkbox(&mut self.canvas.show_grid, "Grid");
        });
    }

    fn draw_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match &self.status {
                Some(message) => ui.label(message),
                None => ui.weak(
                    "Double-click: add object · Click: select · Drag: move · Shift-drag: draw vector",
                ),
            };
            if let Ok(dims) = self.canvas_dimensions() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(format!("{:.0} × {:.0}", dims.width, dims.height));
                });
            }
        });
    }

    /// Renders the properties panel: selection, label editor, interactions and vectors.
    fn draw_properties_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Selection");
        if self.diagram.selected_objects().is_empty() {
            ui.weak("Click objects to select them. Select two to add an interaction.");
        }
        for (index, id) in self.diagram.selected_objects().iter().enumerate() {
            if let Some(object) = self.diagram.object(*id) {
                ui.label(format!("{}. {}", index + 1, object.label));
            }
        }

        if let Some(editing_id) = self.diagram.editing_object().map(|o| o.id) {
            ui.separator();
            self.draw_label_editor(ui, editing_id);
        }

        ui.separator();
        ui.heading("Interactions");
        let mut remove_interaction = None;
        for interaction in self.diagram.interactions() {
            let from = self.object_label(interaction.from_object_id);
            let to = self.object_label(interaction.to_object_id);
            ui.horizontal(|ui| {
                ui.label(format!(
                    "{} ↔ {}: {}",
                    from,
                    to,
                    ForceLabel::parse(&interaction.label).to_plain()
                ))
                .on_hover_text(&interaction.label);
                if ui.small_button("✖").clicked() {
                    remove_interaction = Some(interaction.id);
                }
            });
        }
        if let Some(id) = remove_interaction {
            let _ = self.diagram.delete_interaction(id);
        }

        ui.separator();
        ui.heading("Vectors");
        ui.horizontal(|ui| {
            ui.label("New vector label:");
            ui.text_edit_singleline(&mut self.gesture.new_vector_label);
        });
        let highlighted = self.vectors.highlighted_vector_id();
        let mut highlight_request = None;
        let mut remove_vector = None;
        for vector in self.vectors.vectors() {
            let owner = vector
                .object_id
                .map(|id| self.object_label(id))
                .unwrap_or_else(|| "free".to_string());
            ui.horizontal(|ui| {
                let text = format!(
                    "{} on {} ({:.0})",
                    ForceLabel::parse(&vector.label).to_plain(),
                    owner,
                    vector.magnitude()
                );
                if ui.selectable_label(highlighted == Some(vector.id), text).clicked() {
                    highlight_request = Some(vector.id);
                }
                if ui.small_button("✖").clicked() {
                    remove_vector = Some(vector.id);
                }
            });
        }
        if let Some(id) = highlight_request {
            if highlighted == Some(id) {
                self.vectors.clear_highlighted_vector();
            } else {
                self.vectors.set_highlighted_vector(id);
            }
        }
        if let Some(id) = remove_vector {
            let _ = self.vectors.delete_vector(id);
            if highlighted == Some(id) {
                self.vectors.clear_highlighted_vector();
            }
        }
    }

    fn draw_label_editor(&mut self, ui: &mut egui::Ui, id: ObjectId) {
        ui.label("Object label:");
        let response = ui.text_edit_singleline(&mut self.gesture.temp_label);
        if !self.gesture.focus_requested_for_edit {
            response.request_focus();
            self.gesture.focus_requested_for_edit = true;
        }
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() || enter {
                self.save_label_edit(id);
            }
            if ui.button("Cancel").clicked() {
                self.cancel_label_edit(id);
            }
        });
    }

    fn object_label(&self, id: ObjectId) -> String {
        self.diagram
            .object(id)
            .map(|o| o.label.clone())
            .unwrap_or_else(|| "?".to_string())
    }

    /// Starts editing an object's label, seeding the editor with the current text.
    pub fn start_editing_label(&mut self, id: ObjectId) {
        if self.diagram.set_object_editing(id, true).is_applied() {
            self.gesture.temp_label = self.object_label(id);
            self.gesture.focus_requested_for_edit = false;
        }
    }

    /// Writes the edited label back to the object and stops editing.
    pub fn save_label_edit(&mut self, id: ObjectId) {
        let label = self.gesture.temp_label.trim().to_string();
        if !label.is_empty() {
            let _ = self.diagram.update_object_label(id, label);
        }
        let _ = self.diagram.set_object_editing(id, false);
        self.gesture.temp_label.clear();
    }

    /// Stops editing without changing the label.
    pub fn cancel_label_edit(&mut self, id: ObjectId) {
        let _ = self.diagram.set_object_editing(id, false);
        self.gesture.temp_label.clear();
    }

    /// Adds an interaction of the given type between the selected objects and
    /// reports the outcome in the status bar.
    pub fn add_interaction_of(&mut self, kind: &InteractionType) {
        let outcome = self.diagram.add_interaction(&ForceLabel::parse(kind.value));
        self.status = Some(match outcome {
            InteractionOutcome::Added(_) => format!("Added {} interaction", kind.text),
            InteractionOutcome::Duplicate => {
                format!("A {} interaction already joins these objects", kind.text)
            }
            InteractionOutcome::NeedsTwoSelected => {
                "Select exactly two objects to add an interaction".to_string()
            }
            InteractionOutcome::EndpointNotFound => "Selected object no longer exists".to_string(),
        });
    }

    /// Deletes the selected objects together with their interactions and
    /// attached vectors, and the highlighted vector.
    pub fn delete_selected(&mut self) {
        let selected: Vec<ObjectId> = self.diagram.selected_objects().to_vec();
        for id in selected {
            let removed = self.diagram.delete_interactions_for_object(id);
            let _ = self.diagram.delete_object(id);
            let attached: Vec<VectorId> =
                self.vectors.vectors_for_object(id).map(|v| v.id).collect();
            for vector_id in attached {
                let _ = self.vectors.delete_vector(vector_id);
            }
            debug!("Deleted object {} and {} interactions", id, removed);
        }
        if let Some(id) = self.vectors.highlighted_vector_id() {
            let _ = self.vectors.delete_vector(id);
            self.vectors.clear_highlighted_vector();
        }
    }

    /// Handles the Delete/Backspace keys for removing selected items.
    fn handle_delete_key(&mut self, ctx: &egui::Context) {
        // Typing in a text field must not delete objects
        if ctx.wants_keyboard_input() {
            return;
        }
        let pressed =
            ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace));
        if pressed {
            self.delete_selected();
        }
    }

    fn copy_diagram_json(&mut self, ctx: &egui::Context) {
        let snapshot = DiagramSnapshot {
            diagram: &self.diagram,
            vectors: &self.vectors,
        };
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => {
                ctx.copy_text(json);
                self.status = Some("Diagram copied to clipboard".to_string());
            }
            Err(err) => {
                error!("Failed to serialize diagram: {err}");
                self.status = Some(format!("Copy failed: {err}"));
            }
        }
    }

    /// Renders the canvas and handles pointer input on it.
    ///
    /// The canvas provides its size to the session's dimension scope every
    /// frame before anything reads it.
    fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;

        self.canvas.origin = rect.min;
        self.dimensions.provide(rect.width().floor(), rect.height().floor());
        let dims = match self.canvas_dimensions() {
            Ok(dims) => dims,
            Err(err) => {
                error!("Cannot draw canvas: {err}");
                return;
            }
        };

        self.handle_canvas_pointer(ui, &response, &dims);
        self.render_diagram(&painter, rect, &dims);
    }
}

#[cfg(test)]
mod tests;
