//! Built-in scenes that can be quickly loaded from the UI.
//!
//! Each preset is a small textbook situation with its objects, the force
//! interactions between them and a few force vectors already drawn.

use crate::coordinates::GridPoint;
use crate::diagram::InteractionDiagram;
use crate::labels::ForceLabel;
use crate::types::*;
use crate::vectors::ForceVectors;
use log::info;

/// Kinds of built-in scenes available from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetKind {
    /// A book resting on a table, on the Earth
    BookOnTable,
    /// Earth and Moon attracting each other
    EarthMoon,
    /// Two charged spheres hanging side by side
    ChargedSpheres,
}

/// Metadata for a single preset.
pub struct PresetInfo {
    /// Stable identifier for the preset
    pub kind: PresetKind,
    /// Human-friendly display name
    pub name: &'static str,
}

/// Returns all presets with their display names.
pub const fn all_presets() -> &'static [PresetInfo] {
    const PRESETS: &[PresetInfo] = &[
        PresetInfo {
            kind: PresetKind::BookOnTable,
            name: "Book on a table",
        },
        PresetInfo {
            kind: PresetKind::EarthMoon,
            name: "Earth and Moon",
        },
        PresetInfo {
            kind: PresetKind::ChargedSpheres,
            name: "Charged spheres",
        },
    ];
    PRESETS
}

/// A freshly built scene.
pub struct Preset {
    /// Objects and interactions
    pub diagram: InteractionDiagram,
    /// Force vectors drawn on the objects
    pub vectors: ForceVectors,
}

/// Builds the scene for the given preset kind.
pub fn build_preset(kind: PresetKind) -> Preset {
    info!("Loading preset {:?}", kind);
    match kind {
        PresetKind::BookOnTable => build_book_on_table(),
        PresetKind::EarthMoon => build_earth_moon(),
        PresetKind::ChargedSpheres => build_charged_spheres(),
    }
}

fn label(text: &str) -> ForceLabel {
    ForceLabel::parse(text)
}

fn build_book_on_table() -> Preset {
    let mut diagram = InteractionDiagram::new();
    let book = diagram.add_object_with_label(0.0, 100.0, "Book");
    let table = diagram.add_object_with_label(0.0, 0.0, "Table");
    let earth = diagram.add_object_with_label(0.0, -150.0, "Earth");

    diagram.add_interaction_between(&label("\\vec{F}_N"), book, table);
    diagram.add_interaction_between(&label("\\vec{F}_g"), book, earth);
    diagram.add_interaction_between(&label("\\vec{F}_g"), table, earth);
    diagram.add_interaction_between(&label("\\vec{F}_N"), table, earth);

    let mut vectors = ForceVectors::new();
    vectors.add_vector(
        ForceVector::new(GridPoint::new(0.0, 100.0), GridPoint::new(0.0, 40.0))
            .with_label("\\vec{F}_g")
            .on_object(book),
    );
    vectors.add_vector(
        ForceVector::new(GridPoint::new(0.0, 100.0), GridPoint::new(0.0, 160.0))
            .with_label("\\vec{F}_N")
            .on_object(book),
    );

    Preset { diagram, vectors }
}

fn build_earth_moon() -> Preset {
    let mut diagram = InteractionDiagram::with_label_style(LabelStyle::AnnotateTarget);
    let earth = diagram.add_object_with_label(-120.0, 0.0, "Earth");
    let moon = diagram.add_object_with_label(120.0, 0.0, "Moon");

    // One arc per direction of the pair
    diagram.add_interaction_between(&label("\\vec{F}_g"), earth, moon);
    diagram.add_interaction_between(&label("\\vec{F}_g"), moon, earth);

    let mut vectors = ForceVectors::new();
    vectors.add_vector(
        ForceVector::new(GridPoint::new(120.0, 0.0), GridPoint::new(60.0, 0.0))
            .with_label("\\vec{F}_{g,\\text{Moon}}")
            .on_object(moon),
    );
    vectors.add_vector(
        ForceVector::new(GridPoint::new(-120.0, 0.0), GridPoint::new(-60.0, 0.0))
            .with_label("\\vec{F}_{g,\\text{Earth}}")
            .on_object(earth),
    );

    Preset { diagram, vectors }
}

fn build_charged_spheres() -> Preset {
    let mut diagram = InteractionDiagram::new();
    let left = diagram.add_object_with_label(-80.0, 0.0, "Sphere A");
    let right = diagram.add_object_with_label(80.0, 0.0, "Sphere B");
    let earth = diagram.add_object_with_label(0.0, -180.0, "Earth");

    diagram.add_interaction_between(&label("\\vec{F}_e"), left, right);
    diagram.add_interaction_between(&label("\\vec{F}_g"), left, right);
    diagram.add_interaction_between(&label("\\vec{F}_g"), left, earth);
    diagram.add_interaction_between(&label("\\vec{F}_g"), right, earth);

    let mut vectors = ForceVectors::new();
    vectors.add_vector(
        ForceVector::new(GridPoint::new(-80.0, 0.0), GridPoint::new(-140.0, 0.0))
            .with_label("\\vec{F}_e")
            .on_object(left),
    );
    vectors.add_vector(
        ForceVector::new(GridPoint::new(80.0, 0.0), GridPoint::new(140.0, 0.0))
            .with_label("\\vec{F}_e")
            .on_object(right),
    );

    Preset { diagram, vectors }
}
