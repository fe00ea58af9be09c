//! Shared application-wide constants.
//! Centralizes tweakable values used by the stores, the coordinate helpers and the canvas.

// Canvas dimensions
/// Width used when no canvas dimensions were provided to a scope.
pub const DEFAULT_CANVAS_WIDTH: f32 = 500.0;
/// Height used when no canvas dimensions were provided to a scope.
pub const DEFAULT_CANVAS_HEIGHT: f32 = 500.0;

// Interaction arcs
/// Arc height of the first interaction drawn between a pair of objects.
pub const ARC_BASE_HEIGHT: f32 = 50.0;
/// Extra arc height added for every interaction already present between the same pair.
pub const ARC_HEIGHT_STEP: f32 = 30.0;

// Objects
/// Label given to objects created without an explicit label.
pub const DEFAULT_OBJECT_LABEL: &str = "Object";
/// Radius of an object circle in grid units.
pub const OBJECT_RADIUS: f32 = 22.0;

// Grid/drawing
/// Grid cell size in grid units.
pub const GRID_SIZE: f32 = 25.0;
/// Size of the arrow head drawn at the tip of force vectors (in pixels).
pub const VECTOR_ARROW_SIZE: f32 = 10.0;
/// Distance in pixels within which a click picks a vector head or an arc.
pub const PICK_TOLERANCE: f32 = 8.0;

// Window
/// Initial native window size in logical points.
pub const DEFAULT_WINDOW_SIZE: (f32, f32) = (1100.0, 720.0);
