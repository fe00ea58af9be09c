#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), eframe::Error> {
    // Set up logging for development
    env_logger::init();

    // Run the force diagram application
    force_diagram_tool::run_app()
}

// The web build starts from `start_web` in the library.
#[cfg(target_arch = "wasm32")]
fn main() {}
