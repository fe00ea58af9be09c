use super::state::DragTarget;
use super::*;
use crate::coordinates::{CanvasDimensions, GridPoint};
use crate::presets::PresetKind;

/// Run a single headless egui frame with the provided closure.
fn run_ui_with(mut f: impl FnMut(&egui::Context)) -> egui::FullOutput {
    let mut raw = egui::RawInput::default();
    raw.screen_rect = Some(egui::Rect::from_min_size(
        egui::Pos2::ZERO,
        egui::vec2(1200.0, 800.0),
    ));

    let ctx = egui::Context::default();
    ctx.run(raw, |ctx| {
        ctx.set_visuals(egui::Visuals::dark());
        f(ctx);
    })
}

/// App whose canvas starts at the screen origin and measures 800×600.
fn app_with_canvas() -> DiagramApp {
    let mut app = DiagramApp::default();
    app.canvas.origin = egui::Pos2::ZERO;
    app.dimensions.provide(800.0, 600.0);
    app
}

fn dims(app: &DiagramApp) -> CanvasDimensions {
    app.canvas_dimensions().expect("dimensions provided")
}

#[test]
fn canvas_dimensions_fail_before_first_layout() {
    let app = DiagramApp::default();
    assert!(app.canvas_dimensions().is_err());
}

#[test]
fn screen_and_grid_positions_account_for_canvas_origin() {
    let mut app = app_with_canvas();
    app.canvas.origin = egui::pos2(100.0, 50.0);
    let dims = dims(&app);

    let screen = app.grid_to_screen(GridPoint::new(10.0, 20.0), &dims);
    assert_eq!(screen, egui::pos2(100.0 + 410.0, 50.0 + 280.0));
    assert_eq!(app.screen_to_grid(screen, &dims), GridPoint::new(10.0, 20.0));
}

#[test]
fn double_click_on_empty_space_adds_object_and_starts_editing() {
    let mut app = app_with_canvas();

    app.handle_double_click(GridPoint::new(30.4, -12.6));

    let objects = app.diagram.objects();
    assert_eq!(objects.len(), 1);
    assert_eq!((objects[0].x, objects[0].y), (30.0, -13.0));
    assert!(objects[0].is_editing);
    assert_eq!(app.gesture.temp_label, "Object");
}

#[test]
fn double_click_on_object_edits_it() {
    let mut app = app_with_canvas();
    let a = app.diagram.add_object_with_label(0.0, 0.0, "Book");
    let b = app.diagram.add_object_with_label(200.0, 0.0, "Table");
    app.start_editing_label(a);

    app.handle_double_click(GridPoint::new(205.0, 3.0));

    assert_eq!(app.diagram.objects().len(), 2);
    assert_eq!(app.diagram.editing_object().map(|o| o.id), Some(b));
    assert_eq!(app.gesture.temp_label, "Table");
}

#[test]
fn double_click_on_object_leaves_selection_unchanged() {
    let mut app = app_with_canvas();
    let a = app.diagram.add_object_with_label(0.0, 0.0, "Book");
    let b = app.diagram.add_object_with_label(200.0, 0.0, "Table");
    let _ = app.diagram.toggle_object_selection(a);

    // egui reports the first click of a double click as a plain click
    app.handle_click(GridPoint::new(202.0, 1.0));
    app.handle_double_click(GridPoint::new(202.0, 1.0));

    assert_eq!(app.diagram.selected_objects(), &[a]);
    assert!(!app.diagram.object(b).unwrap().selected);
    assert_eq!(app.diagram.editing_object().map(|o| o.id), Some(b));

    // Double-clicking an already selected object keeps it selected
    app.handle_click(GridPoint::new(1.0, 1.0));
    app.handle_double_click(GridPoint::new(1.0, 1.0));
    assert_eq!(app.diagram.selected_objects(), &[a]);
    assert_eq!(app.diagram.editing_object().map(|o| o.id), Some(a));
}

#[test]
fn label_edit_save_and_cancel() {
    let mut app = app_with_canvas();
    let id = app.diagram.add_object(0.0, 0.0);

    app.start_editing_label(id);
    app.gesture.temp_label = "  Crate ".to_string();
    app.save_label_edit(id);
    assert_eq!(app.diagram.object(id).unwrap().label, "Crate");
    assert!(app.diagram.editing_object().is_none());

    app.start_editing_label(id);
    app.gesture.temp_label = "Ignored".to_string();
    app.cancel_label_edit(id);
    assert_eq!(app.diagram.object(id).unwrap().label, "Crate");
    assert!(app.diagram.editing_object().is_none());
}

#[test]
fn clicks_select_objects_and_add_interaction() {
    let mut app = app_with_canvas();
    let a = app.diagram.add_object_with_label(-100.0, 0.0, "Earth");
    let b = app.diagram.add_object_with_label(100.0, 0.0, "Moon");

    app.handle_click(GridPoint::new(-95.0, 5.0));
    app.handle_click(GridPoint::new(100.0, -10.0));
    assert_eq!(app.diagram.selected_objects(), &[a, b]);

    let gravitational = &INTERACTION_TYPES[0];
    app.add_interaction_of(gravitational);

    assert_eq!(app.diagram.get_interaction_count(a, b), 1);
    assert!(app.diagram.selected_objects().is_empty());
    assert_eq!(app.status.as_deref(), Some("Added Gravitational interaction"));
}

#[test]
fn add_interaction_reports_missing_selection_and_duplicates() {
    let mut app = app_with_canvas();
    let a = app.diagram.add_object(-100.0, 0.0);
    let b = app.diagram.add_object(100.0, 0.0);
    let normal = &INTERACTION_TYPES[3];

    app.add_interaction_of(normal);
    assert_eq!(
        app.status.as_deref(),
        Some("Select exactly two objects to add an interaction")
    );

    let _ = app.diagram.toggle_object_selection(a);
    let _ = app.diagram.toggle_object_selection(b);
    app.add_interaction_of(normal);
    let _ = app.diagram.toggle_object_selection(b);
    let _ = app.diagram.toggle_object_selection(a);
    app.add_interaction_of(normal);

    assert_eq!(app.diagram.interactions().len(), 1);
    assert_eq!(
        app.status.as_deref(),
        Some("A Normal interaction already joins these objects")
    );
}

#[test]
fn click_on_empty_space_clears_selection_and_highlight() {
    let mut app = app_with_canvas();
    let a = app.diagram.add_object(0.0, 0.0);
    let _ = app.diagram.toggle_object_selection(a);
    app.vectors.set_highlighted_vector(uuid::Uuid::new_v4());

    app.handle_click(GridPoint::new(250.0, 250.0));

    assert!(app.diagram.selected_objects().is_empty());
    assert_eq!(app.vectors.highlighted_vector_id(), None);
}

#[test]
fn clicking_vector_toggles_highlight() {
    let mut app = app_with_canvas();
    let vector = ForceVector::new(GridPoint::new(0.0, 100.0), GridPoint::new(100.0, 100.0));
    let id = vector.id;
    app.vectors.add_vector(vector);

    app.handle_click(GridPoint::new(50.0, 102.0));
    assert_eq!(app.vectors.highlighted_vector_id(), Some(id));

    app.handle_click(GridPoint::new(50.0, 98.0));
    assert_eq!(app.vectors.highlighted_vector_id(), None);
}

#[test]
fn dragging_object_moves_it_with_attached_vectors() {
    let mut app = app_with_canvas();
    let id = app.diagram.add_object(0.0, 0.0);
    let vector = ForceVector::new(GridPoint::new(0.0, 0.0), GridPoint::new(0.0, -50.0)).on_object(id);
    let vector_id = vector.id;
    app.vectors.add_vector(vector);

    app.begin_drag(GridPoint::new(5.0, 5.0), false);
    assert_eq!(app.gesture.drag, Some(DragTarget::Object(id)));
    app.continue_drag(GridPoint::new(25.0, 15.0));
    app.continue_drag(GridPoint::new(45.0, 25.0));
    app.end_drag();

    let object = app.diagram.object(id).unwrap();
    assert_eq!((object.x, object.y), (40.0, 20.0));
    let moved = app.vectors.vector(vector_id).unwrap();
    assert_eq!(moved.tail, GridPoint::new(40.0, 20.0));
    assert_eq!(moved.head, GridPoint::new(40.0, -30.0));
    assert_eq!(app.gesture.drag, None);
}

#[test]
fn shift_drag_from_object_draws_attached_vector() {
    let mut app = app_with_canvas();
    let id = app.diagram.add_object(10.0, 10.0);
    app.gesture.new_vector_label = "\\vec{F}_g".to_string();

    app.begin_drag(GridPoint::new(12.0, 8.0), true);
    app.continue_drag(GridPoint::new(10.0, -60.0));
    app.end_drag();

    let vectors = app.vectors.vectors();
    assert_eq!(vectors.len(), 1);
    assert_eq!(vectors[0].object_id, Some(id));
    assert_eq!(vectors[0].tail, GridPoint::new(10.0, 10.0));
    assert_eq!(vectors[0].head, GridPoint::new(10.0, -60.0));
    assert_eq!(vectors[0].label, "\\vec{F}_g");
    assert_eq!(app.vectors.highlighted_vector_id(), Some(vectors[0].id));
    // Drawing a vector does not move the object.
    assert_eq!(app.diagram.object(id).unwrap().position(), GridPoint::new(10.0, 10.0));
}

#[test]
fn zero_length_vector_is_discarded() {
    let mut app = app_with_canvas();

    app.begin_drag(GridPoint::new(100.0, 100.0), true);
    app.end_drag();

    assert!(app.vectors.vectors().is_empty());
    assert_eq!(app.vectors.highlighted_vector_id(), None);
}

#[test]
fn shift_drag_marks_vector_as_new() {
    let mut app = app_with_canvas();

    app.begin_drag(GridPoint::new(100.0, 100.0), true);

    let id = app.vectors.vectors()[0].id;
    assert_eq!(app.gesture.drag, Some(DragTarget::NewVector(id)));
}

#[test]
fn existing_vector_dragged_onto_its_tail_is_kept() {
    let mut app = app_with_canvas();
    let mut vector = ForceVector::new(GridPoint::new(0.0, 0.0), GridPoint::new(100.0, 0.0))
        .with_label("\\vec{T}");
    vector.extra.insert("color".to_string(), "blue".into());
    let id = vector.id;
    app.vectors.add_vector(vector);

    app.begin_drag(GridPoint::new(100.0, 0.0), false);
    assert_eq!(app.gesture.drag, Some(DragTarget::VectorHead(id)));
    app.continue_drag(GridPoint::new(0.3, 0.0));
    app.end_drag();

    let kept = app.vectors.vector(id).expect("existing vector survives");
    assert_eq!(kept.head, GridPoint::new(0.3, 0.0));
    assert_eq!(kept.label, "\\vec{T}");
    assert_eq!(kept.extra["color"], "blue");
}

#[test]
fn dragging_vector_head_updates_only_head() {
    let mut app = app_with_canvas();
    let vector = ForceVector::new(GridPoint::new(0.0, 0.0), GridPoint::new(100.0, 0.0))
        .with_label("\\vec{T}");
    let id = vector.id;
    app.vectors.add_vector(vector);

    app.begin_drag(GridPoint::new(101.0, 1.0), false);
    assert_eq!(app.gesture.drag, Some(DragTarget::VectorHead(id)));
    app.continue_drag(GridPoint::new(120.0, 40.0));
    app.end_drag();

    let vector = app.vectors.vector(id).unwrap();
    assert_eq!(vector.head, GridPoint::new(120.0, 40.0));
    assert_eq!(vector.tail, GridPoint::new(0.0, 0.0));
    assert_eq!(vector.label, "\\vec{T}");
}

#[test]
fn delete_selected_removes_objects_interactions_and_vectors() {
    let mut app = app_with_canvas();
    let a = app.diagram.add_object(-100.0, 0.0);
    let b = app.diagram.add_object(100.0, 0.0);
    let c = app.diagram.add_object(0.0, 100.0);
    let gravity = ForceLabel::parse("\\vec{F}_g");
    app.diagram.add_interaction_between(&gravity, a, b);
    app.diagram.add_interaction_between(&gravity, b, c);
    app.vectors.add_vector(
        ForceVector::new(GridPoint::new(-100.0, 0.0), GridPoint::new(-100.0, -40.0)).on_object(a),
    );
    app.vectors.add_vector(
        ForceVector::new(GridPoint::new(100.0, 0.0), GridPoint::new(100.0, -40.0)).on_object(b),
    );

    let _ = app.diagram.toggle_object_selection(a);
    app.delete_selected();

    assert!(app.diagram.object(a).is_none());
    assert_eq!(app.diagram.interactions().len(), 1);
    assert!(app.diagram.interactions()[0].connects(b, c));
    assert_eq!(app.vectors.vectors().len(), 1);
    assert_eq!(app.vectors.vectors()[0].object_id, Some(b));
}

#[test]
fn load_preset_replaces_stores() {
    let mut app = app_with_canvas();
    app.diagram.add_object(0.0, 0.0);

    app.load_preset(PresetKind::BookOnTable);

    let labels: Vec<_> = app.diagram.objects().iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, ["Book", "Table", "Earth"]);
    assert_eq!(app.vectors.vectors().len(), 2);

    app.clear_all();
    assert!(app.diagram.objects().is_empty());
    assert!(app.vectors.vectors().is_empty());
}

#[test]
fn load_preset_keeps_chosen_label_style() {
    let mut app = app_with_canvas();
    assert_eq!(app.diagram.label_style(), LabelStyle::Plain);

    app.load_preset(PresetKind::EarthMoon);
    assert_eq!(app.diagram.label_style(), LabelStyle::Plain);
    // The preset's own arcs keep their annotated labels
    assert!(app.diagram.interactions()[0].label.contains("\\text{"));

    app.diagram.set_label_style(LabelStyle::AnnotateTarget);
    app.load_preset(PresetKind::BookOnTable);
    assert_eq!(app.diagram.label_style(), LabelStyle::AnnotateTarget);

    app.clear_all();
    assert_eq!(app.diagram.label_style(), LabelStyle::AnnotateTarget);
}

#[test]
fn arc_peak_sits_arc_height_away_from_chord() {
    let mut app = app_with_canvas();
    let a = app.diagram.add_object(-100.0, 0.0);
    let b = app.diagram.add_object(100.0, 0.0);
    let gravity = ForceLabel::parse("\\vec{F}_g");
    let normal = ForceLabel::parse("\\vec{F}_N");
    app.diagram.add_interaction_between(&gravity, a, b);
    app.diagram.add_interaction_between(&normal, b, a);
    let dims = dims(&app);

    let chord_y = app.grid_to_screen(GridPoint::new(0.0, 0.0), &dims).y;
    let mut offsets = Vec::new();
    for interaction in app.diagram.interactions() {
        let points = app.interaction_arc_points(interaction, &dims).unwrap();
        let peak = points[points.len() / 2];
        offsets.push(peak.y - chord_y);
    }

    // Both arcs bend to the same side, the second one further out.
    assert_eq!(offsets.len(), 2);
    assert!((offsets[0].abs() - 50.0).abs() < 0.01);
    assert!((offsets[1].abs() - 80.0).abs() < 0.01);
    assert_eq!(offsets[0].signum(), offsets[1].signum());
}

#[test]
fn arc_points_skip_missing_endpoints() {
    let mut app = app_with_canvas();
    let a = app.diagram.add_object(-100.0, 0.0);
    let b = app.diagram.add_object(100.0, 0.0);
    app.diagram
        .add_interaction_between(&ForceLabel::parse("\\vec{F}_g"), a, b);
    let _ = app.diagram.delete_object(b);
    let dims = dims(&app);

    let interaction = &app.diagram.interactions()[0];
    assert!(app.interaction_arc_points(interaction, &dims).is_none());
}

#[test]
fn canvas_frame_provides_dimensions_and_renders_preset() {
    let mut app = DiagramApp::default();
    app.load_preset(PresetKind::ChargedSpheres);

    let output = run_ui_with(|ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
    });

    let dims = app.canvas_dimensions().expect("canvas provided its size");
    assert!(dims.width > 0.0 && dims.width <= 1200.0);
    assert!(dims.height > 0.0 && dims.height <= 800.0);
    assert!(!output.shapes.is_empty());
}

#[test]
fn canvas_frame_keeps_handle_shared_across_frames() {
    let mut app = DiagramApp::default();
    run_ui_with(|ctx| {
        egui::CentralPanel::default().show(ctx, |ui| {
            app.draw_canvas(ui);
        });
    });
    let held = app.dimensions.use_dimensions().unwrap();

    app.dimensions.provide(321.0, 123.0);

    assert_eq!(held.snapshot(), CanvasDimensions::new(321.0, 123.0));
}
