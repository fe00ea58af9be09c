//! # Force Diagram Tool
//!
//! An educational diagramming tool for physics instruction. Users place
//! objects on a canvas, draw force-interaction arcs between pairs of objects
//! and annotate force vectors.
//!
//! ## Core
//! - [`InteractionDiagram`]: objects, interactions and multi-select state
//! - [`ForceVectors`]: force vectors and the highlighted vector
//! - [`grid_to_canvas`] / [`canvas_to_grid`]: grid space ↔ canvas pixels
//! - [`DimensionsScope`]: canvas dimensions shared within one rendering session
//! - [`ForceLabel`]: structured force labels rendered as `\vec{F}_g`-style text
//!
//! ## Features
//! - Interactive object creation, selection, dragging and renaming
//! - Interaction arcs stacked per object pair
//! - Force vectors drawn with shift-drag
//! - Built-in preset scenes

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;
mod coordinates;
mod diagram;
mod dimensions;
mod labels;
pub mod presets;
mod types;
mod ui;
mod vectors;

// Re-export public types and functions
pub use coordinates::*;
pub use diagram::InteractionDiagram;
pub use dimensions::{DimensionsError, DimensionsScope, SharedDimensions};
pub use labels::ForceLabel;
pub use types::*;
pub use vectors::ForceVectors;
use ui::DiagramApp;

/// Runs the force diagram application in a native window.
///
/// This function initializes the egui application window and starts the main event loop.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use force_diagram_tool::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn run_app() -> Result<(), eframe::Error> {
    let (width, height) = constants::DEFAULT_WINDOW_SIZE;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([width, height]),
        ..Default::default()
    };
    eframe::run_native(
        "Force Diagram Tool",
        options,
        Box::new(|_cc| Ok(Box::new(DiagramApp::default()))),
    )
}

/// Starts the application inside the `<canvas id="force_diagram_canvas">` element.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start_web() -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;

    let _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
    log::info!("Logging initialized");

    let canvas = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id("force_diagram_canvas"))
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("missing #force_diagram_canvas element"))?
        .dyn_into::<web_sys::HtmlCanvasElement>()?;

    wasm_bindgen_futures::spawn_local(async move {
        let result = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|_cc| Ok(Box::new(DiagramApp::default()))),
            )
            .await;
        if let Err(err) = result {
            log::error!("Failed to start the web app: {err:?}");
        }
    });
    Ok(())
}
