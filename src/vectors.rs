//! The force vectors store.
//!
//! Holds the force vectors drawn on the diagram and which one, if any, is
//! highlighted. Vectors are matched by id only; their contents are not checked.

use crate::coordinates::GridPoint;
use crate::types::*;
use log::debug;
use serde::{Deserialize, Serialize};

/// Force vectors of one diagram plus the highlighted vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceVectors {
    vectors: Vec<ForceVector>,
    highlighted_vector_id: Option<VectorId>,
}

impl ForceVectors {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All vectors in insertion order.
    pub fn vectors(&self) -> &[ForceVector] {
        &self.vectors
    }

    /// Looks up a vector by id.
    pub fn vector(&self, id: VectorId) -> Option<&ForceVector> {
        self.vectors.iter().find(|v| v.id == id)
    }

    /// Vectors attached to the given object.
    pub fn vectors_for_object(&self, object_id: ObjectId) -> impl Iterator<Item = &ForceVector> {
        self.vectors
            .iter()
            .filter(move |v| v.object_id == Some(object_id))
    }

    /// Appends a vector.
    pub fn add_vector(&mut self, vector: ForceVector) {
        debug!("Adding vector to store: {:?}", vector);
        self.vectors.push(vector);
    }

    /// Removes the vector with the given id.
    pub fn delete_vector(&mut self, id: VectorId) -> Outcome {
        let before = self.vectors.len();
        self.vectors.retain(|v| v.id != id);
        if self.vectors.len() < before {
            Outcome::Applied
        } else {
            Outcome::NotFound
        }
    }

    /// Replaces the vector with the same id, keeping its position in the list.
    pub fn update_vector(&mut self, vector: ForceVector) -> Outcome {
        match self.vectors.iter_mut().find(|v| v.id == vector.id) {
            Some(slot) => {
                *slot = vector;
                Outcome::Applied
            }
            None => Outcome::NotFound,
        }
    }

    /// Replaces only the head of a vector.
    pub fn update_vector_head(&mut self, id: VectorId, head: GridPoint) -> Outcome {
        match self.vectors.iter_mut().find(|v| v.id == id) {
            Some(vector) => {
                vector.head = head;
                Outcome::Applied
            }
            None => Outcome::NotFound,
        }
    }

    /// Removes every vector. The highlighted id is left as is.
    pub fn clear_vectors(&mut self) {
        self.vectors.clear();
    }

    /// Currently highlighted vector id.
    pub fn highlighted_vector_id(&self) -> Option<VectorId> {
        self.highlighted_vector_id
    }

    /// The highlighted vector, if the id names one that still exists.
    pub fn highlighted_vector(&self) -> Option<&ForceVector> {
        self.highlighted_vector_id.and_then(|id| self.vector(id))
    }

    /// Highlights a vector. The id is not checked against the current vectors.
    pub fn set_highlighted_vector(&mut self, id: VectorId) {
        self.highlighted_vector_id = Some(id);
    }

    /// Removes the highlight.
    pub fn clear_highlighted_vector(&mut self) {
        self.highlighted_vector_id = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn vector(x: f32, y: f32) -> ForceVector {
        ForceVector::new(GridPoint::new(0.0, 0.0), GridPoint::new(x, y))
    }

    fn store_with_three() -> (ForceVectors, [VectorId; 3]) {
        let mut store = ForceVectors::new();
        let vs = [vector(1.0, 0.0), vector(0.0, 1.0), vector(-1.0, 0.0)];
        let ids = [vs[0].id, vs[1].id, vs[2].id];
        for v in vs {
            store.add_vector(v);
        }
        (store, ids)
    }

    #[test]
    fn test_add_appends_in_order() {
        let (store, ids) = store_with_three();
        let stored: Vec<_> = store.vectors().iter().map(|v| v.id).collect();
        assert_eq!(stored, ids);
    }

    #[test]
    fn test_delete_vector() {
        let (mut store, ids) = store_with_three();

        assert_eq!(store.delete_vector(ids[1]), Outcome::Applied);
        assert_eq!(store.vectors().len(), 2);
        assert!(store.vector(ids[1]).is_none());

        assert_eq!(store.delete_vector(ids[1]), Outcome::NotFound);
        assert_eq!(store.vectors().len(), 2);
    }

    #[test]
    fn test_update_vector_keeps_position() {
        let (mut store, ids) = store_with_three();
        let mut replacement = vector(5.0, 5.0).with_label("\\vec{T}");
        replacement.id = ids[1];

        assert_eq!(store.update_vector(replacement.clone()), Outcome::Applied);
        assert_eq!(store.vectors()[1], replacement);
        assert_eq!(store.vectors()[0].id, ids[0]);
        assert_eq!(store.vectors()[2].id, ids[2]);
    }

    #[test]
    fn test_update_vector_missing_is_no_op() {
        let (mut store, _) = store_with_three();
        let before = store.clone();

        assert_eq!(store.update_vector(vector(9.0, 9.0)), Outcome::NotFound);
        assert_eq!(store, before);
    }

    #[test]
    fn test_update_head_touches_only_head() {
        let (mut store, ids) = store_with_three();
        let mut labelled = store.vector(ids[0]).unwrap().clone().with_label("\\vec{F}_g");
        labelled
            .extra
            .insert("color".into(), serde_json::Value::from("blue"));
        store.update_vector(labelled);
        let before = store.clone();

        let head = GridPoint::new(42.0, -7.0);
        assert_eq!(store.update_vector_head(ids[0], head), Outcome::Applied);

        let updated = store.vector(ids[0]).unwrap();
        let original = before.vector(ids[0]).unwrap();
        assert_eq!(updated.head, head);
        assert_eq!(updated.tail, original.tail);
        assert_eq!(updated.label, original.label);
        assert_eq!(updated.extra, original.extra);
        assert_eq!(store.vectors()[1..], before.vectors()[1..]);
    }

    #[test]
    fn test_update_head_missing_leaves_store_unchanged() {
        let (mut store, _) = store_with_three();
        let before = serde_json::to_string(&store).unwrap();

        let outcome = store.update_vector_head(Uuid::new_v4(), GridPoint::new(1.0, 1.0));

        assert_eq!(outcome, Outcome::NotFound);
        assert_eq!(serde_json::to_string(&store).unwrap(), before);
    }

    #[test]
    fn test_clear_vectors() {
        let (mut store, ids) = store_with_three();
        store.set_highlighted_vector(ids[0]);

        store.clear_vectors();

        assert!(store.vectors().is_empty());
        assert_eq!(store.highlighted_vector_id(), Some(ids[0]));
        assert!(store.highlighted_vector().is_none());
    }

    #[test]
    fn test_highlight_does_not_validate() {
        let mut store = ForceVectors::new();
        assert_eq!(store.highlighted_vector_id(), None);

        let unknown = Uuid::new_v4();
        store.set_highlighted_vector(unknown);
        assert_eq!(store.highlighted_vector_id(), Some(unknown));

        store.clear_highlighted_vector();
        assert_eq!(store.highlighted_vector_id(), None);
    }

    #[test]
    fn test_vectors_for_object() {
        let object = Uuid::new_v4();
        let mut store = ForceVectors::new();
        store.add_vector(vector(1.0, 1.0).on_object(object));
        store.add_vector(vector(2.0, 2.0));
        store.add_vector(vector(3.0, 3.0).on_object(object));

        assert_eq!(store.vectors_for_object(object).count(), 2);
    }
}
