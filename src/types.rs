//! Core data types and structures for the force diagram tool.
//!
//! This module defines the records owned by the stores: diagram objects,
//! the force interactions drawn between them, force vectors, and the outcome
//! values returned by store operations.

use crate::coordinates::GridPoint;
use crate::labels::ForceLabel;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for diagram objects.
pub type ObjectId = Uuid;

/// Unique identifier for interactions between objects.
pub type InteractionId = Uuid;

/// Unique identifier for force vectors.
pub type VectorId = Uuid;

/// An object placed on the diagram, e.g. a book or a planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramObject {
    /// Unique identifier for this object
    pub id: ObjectId,
    /// Horizontal position in grid coordinates
    pub x: f32,
    /// Vertical position in grid coordinates
    pub y: f32,
    /// User-displayable name of the object
    pub label: String,
    /// Whether the object is part of the current selection
    pub selected: bool,
    /// Whether the object's label is currently being edited
    pub is_editing: bool,
}

impl DiagramObject {
    /// Creates a new unselected object at the given grid position.
    ///
    /// # Arguments
    ///
    /// * `x` - Horizontal grid coordinate
    /// * `y` - Vertical grid coordinate
    /// * `label` - The display name for the object
    ///
    /// # Returns
    ///
    /// A new `DiagramObject` with a unique ID.
    pub fn new(x: f32, y: f32, label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            label: label.into(),
            selected: false,
            is_editing: false,
        }
    }

    /// Position of the object as a grid point.
    pub fn position(&self) -> GridPoint {
        GridPoint::new(self.x, self.y)
    }
}

/// A force interaction between two objects, drawn as an arc.
///
/// The pair is unordered: queries treat `from`/`to` symmetrically. The order
/// only records which object was selected first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Unique identifier for this interaction
    pub id: InteractionId,
    /// Object selected first when the interaction was created
    pub from_object_id: ObjectId,
    /// Object selected second; the target of an annotated label
    pub to_object_id: ObjectId,
    /// Rendered force expression, e.g. `\vec{F}_g`
    pub label: String,
    /// Visual offset separating arcs drawn between the same pair
    pub arc_height: f32,
}

impl Interaction {
    /// Creates a new interaction between two objects.
    pub fn new(
        from_object_id: ObjectId,
        to_object_id: ObjectId,
        label: impl Into<String>,
        arc_height: f32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            from_object_id,
            to_object_id,
            label: label.into(),
            arc_height,
        }
    }

    /// Returns true if this interaction joins `a` and `b`, in either order.
    pub fn connects(&self, a: ObjectId, b: ObjectId) -> bool {
        (self.from_object_id == a && self.to_object_id == b)
            || (self.from_object_id == b && self.to_object_id == a)
    }

    /// Returns true if the object is either endpoint.
    pub fn involves(&self, object_id: ObjectId) -> bool {
        self.from_object_id == object_id || self.to_object_id == object_id
    }

    /// The interaction label parsed back into its structured form.
    pub fn force_label(&self) -> ForceLabel {
        ForceLabel::parse(&self.label)
    }
}

/// A force vector annotation.
///
/// The store only interprets `id` and `head`. Everything else is carried as
/// given; fields the tool does not know about live in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceVector {
    /// Unique identifier for this vector
    pub id: VectorId,
    /// Grid position of the arrow tail
    pub tail: GridPoint,
    /// Grid position of the arrow tip
    pub head: GridPoint,
    /// Rendered force expression shown next to the arrow
    #[serde(default)]
    pub label: String,
    /// Object the vector acts on, if attached to one
    #[serde(default)]
    pub object_id: Option<ObjectId>,
    /// Any other caller-supplied fields
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ForceVector {
    /// Creates a new unlabelled vector from `tail` to `head`.
    pub fn new(tail: GridPoint, head: GridPoint) -> Self {
        Self {
            id: Uuid::new_v4(),
            tail,
            head,
            label: String::new(),
            object_id: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Sets the label, builder style.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Attaches the vector to an object, builder style.
    pub fn on_object(mut self, object_id: ObjectId) -> Self {
        self.object_id = Some(object_id);
        self
    }

    /// Length of the arrow in grid units.
    pub fn magnitude(&self) -> f32 {
        let (dx, dy) = (self.head.x - self.tail.x, self.head.y - self.tail.y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// A kind of force interaction offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionType {
    /// Human-friendly display name
    pub text: &'static str,
    /// Rendered force label
    pub value: &'static str,
}

/// The interaction types offered by the toolbar.
pub const INTERACTION_TYPES: &[InteractionType] = &[
    InteractionType {
        text: "Gravitational",
        value: "\\vec{F}_g",
    },
    InteractionType {
        text: "Electrostatic",
        value: "\\vec{F}_e",
    },
    InteractionType {
        text: "Magnetic",
        value: "\\vec{F}_m",
    },
    InteractionType {
        text: "Normal",
        value: "\\vec{F}_N",
    },
    InteractionType {
        text: "Frictional",
        value: "\\vec{f}",
    },
];

/// How `add_interaction` turns the requested force label into the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LabelStyle {
    /// Store the label exactly as requested
    #[default]
    Plain,
    /// Append the target object's label to the subscript as `\text{...}`
    AnnotateTarget,
}

/// Result of a store operation addressed to a single id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation found its target and was applied
    Applied,
    /// No record with the given id exists; nothing changed
    NotFound,
}

impl Outcome {
    /// Returns true if the operation was applied.
    pub fn is_applied(self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Result of `add_interaction` and `add_interaction_between`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// A new interaction was appended
    Added(InteractionId),
    /// An interaction with the same final label already joins the pair
    Duplicate,
    /// No explicit endpoints were given and the selection did not hold exactly two objects
    NeedsTwoSelected,
    /// One of the endpoints does not name an existing object
    EndpointNotFound,
}

impl InteractionOutcome {
    /// The id of the new interaction, if one was added.
    pub fn added_id(self) -> Option<InteractionId> {
        match self {
            InteractionOutcome::Added(id) => Some(id),
            _ => None,
        }
    }
}
