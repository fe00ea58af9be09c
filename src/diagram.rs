//! The interaction diagram store.
//!
//! Owns the objects on the diagram, the force interactions drawn between them
//! and the multi-select state. All operations run to completion synchronously.
//! Operations addressed to an id that does not exist change nothing and report
//! [`Outcome::NotFound`] instead of failing.

use crate::constants::{ARC_BASE_HEIGHT, ARC_HEIGHT_STEP, DEFAULT_OBJECT_LABEL};
use crate::labels::ForceLabel;
use crate::types::*;
use log::debug;
use serde::{Deserialize, Serialize};

/// Objects, interactions and selection of one diagram.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionDiagram {
    objects: Vec<DiagramObject>,
    interactions: Vec<Interaction>,
    /// Selected object ids in toggle order
    selected_objects: Vec<ObjectId>,
    label_style: LabelStyle,
}

impl InteractionDiagram {
    /// Creates an empty diagram using [`LabelStyle::Plain`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty diagram with the given label style.
    pub fn with_label_style(label_style: LabelStyle) -> Self {
        Self {
            label_style,
            ..Self::default()
        }
    }

    /// Serialize the diagram to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// All objects in insertion order.
    pub fn objects(&self) -> &[DiagramObject] {
        &self.objects
    }

    /// All interactions in insertion order.
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Ids of the selected objects, in the order they were selected.
    pub fn selected_objects(&self) -> &[ObjectId] {
        &self.selected_objects
    }

    /// Looks up an object by id.
    pub fn object(&self, id: ObjectId) -> Option<&DiagramObject> {
        self.objects.iter().find(|obj| obj.id == id)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut DiagramObject> {
        self.objects.iter_mut().find(|obj| obj.id == id)
    }

    /// The object whose label is being edited, if any.
    pub fn editing_object(&self) -> Option<&DiagramObject> {
        self.objects.iter().find(|obj| obj.is_editing)
    }

    /// Current label style used by `add_interaction`.
    pub fn label_style(&self) -> LabelStyle {
        self.label_style
    }

    /// Changes how future interactions are labelled. Existing ones are left alone.
    pub fn set_label_style(&mut self, label_style: LabelStyle) {
        self.label_style = label_style;
    }

    /// The interaction types offered to the user.
    pub fn interaction_types(&self) -> &'static [InteractionType] {
        INTERACTION_TYPES
    }

    /// Adds an object labelled `"Object"` at the given grid position.
    ///
    /// # Returns
    ///
    /// The ID of the newly added object.
    pub fn add_object(&mut self, x: f32, y: f32) -> ObjectId {
        self.add_object_with_label(x, y, DEFAULT_OBJECT_LABEL)
    }

    /// Adds an object with an explicit label.
    pub fn add_object_with_label(&mut self, x: f32, y: f32, label: impl Into<String>) -> ObjectId {
        let object = DiagramObject::new(x, y, label);
        let id = object.id;
        debug!("Adding object {} at ({}, {})", id, x, y);
        self.objects.push(object);
        id
    }

    /// Moves an object to a new grid position.
    pub fn update_object_position(&mut self, id: ObjectId, x: f32, y: f32) -> Outcome {
        match self.object_mut(id) {
            Some(object) => {
                object.x = x;
                object.y = y;
                Outcome::Applied
            }
            None => Outcome::NotFound,
        }
    }

    /// Renames an object.
    pub fn update_object_label(&mut self, id: ObjectId, label: impl Into<String>) -> Outcome {
        match self.object_mut(id) {
            Some(object) => {
                object.label = label.into();
                Outcome::Applied
            }
            None => Outcome::NotFound,
        }
    }

    /// Flips an object's selection, appending it to or removing it from the
    /// ordered selection.
    pub fn toggle_object_selection(&mut self, id: ObjectId) -> Outcome {
        let Some(object) = self.object_mut(id) else {
            return Outcome::NotFound;
        };
        object.selected = !object.selected;
        if object.selected {
            self.selected_objects.push(id);
        } else {
            self.selected_objects.retain(|selected| *selected != id);
        }
        Outcome::Applied
    }

    /// Sets the editing flag of one object after clearing it on every object,
    /// so at most one object is ever being edited.
    ///
    /// The clearing happens even when `id` is unknown.
    pub fn set_object_editing(&mut self, id: ObjectId, is_editing: bool) -> Outcome {
        for object in &mut self.objects {
            object.is_editing = false;
        }
        match self.object_mut(id) {
            Some(object) => {
                object.is_editing = is_editing;
                Outcome::Applied
            }
            None => Outcome::NotFound,
        }
    }

    /// Deselects every object.
    pub fn clear_selection(&mut self) {
        for object in &mut self.objects {
            object.selected = false;
        }
        self.selected_objects.clear();
    }

    /// Adds an interaction between the two selected objects.
    ///
    /// The first selected object becomes `from`, the second `to`. The
    /// selection is cleared afterwards whatever the outcome.
    pub fn add_interaction(&mut self, label: &ForceLabel) -> InteractionOutcome {
        let endpoints = match self.selected_objects.as_slice() {
            [from, to] => Some((*from, *to)),
            _ => None,
        };
        let outcome = match endpoints {
            Some((from, to)) => self.insert_interaction(label, from, to),
            None => InteractionOutcome::NeedsTwoSelected,
        };
        self.clear_selection();
        outcome
    }

    /// Adds an interaction between explicit endpoints, ignoring the selection.
    ///
    /// Like [`InteractionDiagram::add_interaction`], the selection is cleared
    /// afterwards whatever the outcome.
    pub fn add_interaction_between(
        &mut self,
        label: &ForceLabel,
        from: ObjectId,
        to: ObjectId,
    ) -> InteractionOutcome {
        let outcome = self.insert_interaction(label, from, to);
        self.clear_selection();
        outcome
    }

    fn insert_interaction(
        &mut self,
        label: &ForceLabel,
        from: ObjectId,
        to: ObjectId,
    ) -> InteractionOutcome {
        let Some(target) = self.object(to) else {
            return InteractionOutcome::EndpointNotFound;
        };
        if self.object(from).is_none() {
            return InteractionOutcome::EndpointNotFound;
        }

        let final_label = match self.label_style {
            LabelStyle::Plain => label.to_latex(),
            LabelStyle::AnnotateTarget => label.with_annotation(&target.label).to_latex(),
        };

        let existing = self.get_interactions_between(from, to);
        if existing.iter().any(|i| i.label == final_label) {
            debug!("Interaction {} already joins {} and {}", final_label, from, to);
            return InteractionOutcome::Duplicate;
        }

        let arc_height = ARC_BASE_HEIGHT + existing.len() as f32 * ARC_HEIGHT_STEP;
        let interaction = Interaction::new(from, to, final_label, arc_height);
        let id = interaction.id;
        debug!(
            "Adding interaction {} between {} and {} (arc height {})",
            interaction.label, from, to, arc_height
        );
        self.interactions.push(interaction);
        InteractionOutcome::Added(id)
    }

    /// Removes an object and drops it from the selection.
    ///
    /// Interactions that reference the object are kept; call
    /// [`InteractionDiagram::delete_interactions_for_object`] as well.
    pub fn delete_object(&mut self, id: ObjectId) -> Outcome {
        let before = self.objects.len();
        self.objects.retain(|obj| obj.id != id);
        self.selected_objects.retain(|selected| *selected != id);
        if self.objects.len() < before {
            debug!("Deleted object {}", id);
            Outcome::Applied
        } else {
            Outcome::NotFound
        }
    }

    /// Removes every interaction with `object_id` as either endpoint.
    ///
    /// # Returns
    ///
    /// The number of interactions removed.
    pub fn delete_interactions_for_object(&mut self, object_id: ObjectId) -> usize {
        let before = self.interactions.len();
        self.interactions.retain(|i| !i.involves(object_id));
        before - self.interactions.len()
    }

    /// Removes a single interaction.
    pub fn delete_interaction(&mut self, id: InteractionId) -> Outcome {
        match self.interactions.iter().position(|i| i.id == id) {
            Some(index) => {
                self.interactions.remove(index);
                Outcome::Applied
            }
            None => Outcome::NotFound,
        }
    }

    /// All interactions joining `a` and `b`, in either direction.
    pub fn get_interactions_between(&self, a: ObjectId, b: ObjectId) -> Vec<&Interaction> {
        self.interactions.iter().filter(|i| i.connects(a, b)).collect()
    }

    /// Number of interactions joining `a` and `b`, in either direction.
    pub fn get_interaction_count(&self, a: ObjectId, b: ObjectId) -> usize {
        self.interactions.iter().filter(|i| i.connects(a, b)).count()
    }
}
