//! Application state management structures.
//!
//! This module contains the state structures that track the application's
//! current UI state: the canvas placement, in-progress pointer gestures and
//! the temporary text being edited.

use crate::diagram::InteractionDiagram;
use crate::dimensions::DimensionsScope;
use crate::presets::{build_preset, PresetKind};
use crate::types::*;
use crate::vectors::ForceVectors;
use eframe::egui;

/// State related to canvas placement and display.
pub struct CanvasState {
    /// Screen position of the canvas' top-left corner, refreshed every frame
    pub origin: egui::Pos2,
    /// Whether the grid should be displayed on the canvas
    pub show_grid: bool,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            origin: egui::Pos2::ZERO,
            show_grid: true,
        }
    }
}

/// What the pointer is currently dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// An object is being moved
    Object(ObjectId),
    /// The tip of an existing force vector is being moved
    VectorHead(VectorId),
    /// The tip of a vector drawn by this gesture is being placed
    NewVector(VectorId),
}

/// State related to pointer gestures and text editing.
#[derive(Default)]
pub struct GestureState {
    /// Current drag, if any
    pub drag: Option<DragTarget>,
    /// Grid position of the pointer on the previous drag frame
    pub last_drag_pos: Option<crate::GridPoint>,
    /// Object whose selection the last single click toggled
    pub last_click_toggle: Option<ObjectId>,
    /// Temporary storage for an object label while editing
    pub temp_label: String,
    /// Flag to track if focus was already requested for the current edit session
    pub focus_requested_for_edit: bool,
    /// Label given to vectors drawn with shift-drag
    pub new_vector_label: String,
}

/// The main application structure containing UI state and the diagram stores.
///
/// This struct implements the `eframe::App` trait and handles all user interface
/// rendering and interaction logic.
pub struct DiagramApp {
    /// Objects, interactions and selection
    pub diagram: InteractionDiagram,
    /// Force vectors and highlight
    pub vectors: ForceVectors,
    /// Canvas dimensions for this session, provided by the canvas every frame
    pub dimensions: DimensionsScope,
    /// Canvas placement and display state
    pub canvas: CanvasState,
    /// Pointer gesture state
    pub gesture: GestureState,
    /// Last message shown in the status bar
    pub status: Option<String>,
}

impl Default for DiagramApp {
    fn default() -> Self {
        Self {
            diagram: InteractionDiagram::new(),
            vectors: ForceVectors::new(),
            dimensions: DimensionsScope::new(),
            canvas: CanvasState::default(),
            gesture: GestureState {
                new_vector_label: "\\vec{F}".to_string(),
                ..GestureState::default()
            },
            status: None,
        }
    }
}

impl DiagramApp {
    /// Replaces the current diagram and vectors with a built-in scene.
    ///
    /// The label style chosen by the user carries over to the new diagram.
    pub fn load_preset(&mut self, kind: PresetKind) {
        let style = self.diagram.label_style();
        let preset = build_preset(kind);
        self.diagram = preset.diagram;
        self.diagram.set_label_style(style);
        self.vectors = preset.vectors;
        self.gesture.drag = None;
        self.gesture.last_drag_pos = None;
        self.gesture.last_click_toggle = None;
        self.gesture.temp_label.clear();
        self.status = None;
    }

    /// Empties both stores.
    pub fn clear_all(&mut self) {
        let style = self.diagram.label_style();
        self.diagram = InteractionDiagram::with_label_style(style);
        self.vectors = ForceVectors::new();
        self.gesture.drag = None;
        self.gesture.last_click_toggle = None;
        self.status = None;
    }
}
