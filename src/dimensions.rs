//! Scoped canvas dimensions shared between a provider and its consumers.
//!
//! A [`DimensionsScope`] is created once per rendering session and handed down
//! explicitly. The component that owns the canvas calls [`DimensionsScope::provide`];
//! everything below it calls [`DimensionsScope::use_dimensions`] and receives the
//! same shared record, so later size changes are visible to every holder.

use crate::coordinates::CanvasDimensions;
use log::warn;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Errors raised when reading canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionsError {
    /// `use_dimensions` was called on a scope where nothing was provided
    NotProvided,
}

impl fmt::Display for DimensionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotProvided => write!(f, "canvas dimensions were not provided in this scope"),
        }
    }
}

impl std::error::Error for DimensionsError {}

/// Shared handle to a canvas dimensions record.
///
/// Cloning the handle does not copy the record: all clones observe the same
/// width and height.
#[derive(Debug, Clone)]
pub struct SharedDimensions(Rc<RefCell<CanvasDimensions>>);

impl SharedDimensions {
    fn new(dims: CanvasDimensions) -> Self {
        Self(Rc::new(RefCell::new(dims)))
    }

    /// Copy of the current record, for the pure coordinate functions.
    pub fn snapshot(&self) -> CanvasDimensions {
        *self.0.borrow()
    }

    /// Current width in pixels.
    pub fn width(&self) -> f32 {
        self.0.borrow().width
    }

    /// Current height in pixels.
    pub fn height(&self) -> f32 {
        self.0.borrow().height
    }

    /// Overwrites the shared record. Meant for the provider only.
    pub fn set(&self, width: f32, height: f32) {
        let mut dims = self.0.borrow_mut();
        dims.width = width;
        dims.height = height;
    }

    /// Returns true if both handles point at the same record.
    pub fn same_record(&self, other: &SharedDimensions) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Context object carrying the canvas dimensions of one rendering tree.
#[derive(Debug, Clone, Default)]
pub struct DimensionsScope {
    own: Option<SharedDimensions>,
    inherited: Option<SharedDimensions>,
}

impl DimensionsScope {
    /// Creates a scope with nothing provided.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a descendant scope. It sees whatever this scope (or one of its
    /// ancestors) provided until it provides its own record.
    pub fn child(&self) -> Self {
        Self {
            own: None,
            inherited: self.current().cloned(),
        }
    }

    fn current(&self) -> Option<&SharedDimensions> {
        self.own.as_ref().or(self.inherited.as_ref())
    }

    /// Establishes the dimensions for this scope and returns the shared handle.
    ///
    /// Calling it again on the same scope updates the existing record in place,
    /// so consumers that already hold the handle see the new size. Providing in
    /// a child scope shadows the inherited record without touching it.
    pub fn provide(&mut self, width: f32, height: f32) -> SharedDimensions {
        match &self.own {
            Some(shared) => {
                shared.set(width, height);
                shared.clone()
            }
            None => {
                let shared = SharedDimensions::new(CanvasDimensions::new(width, height));
                self.own = Some(shared.clone());
                shared
            }
        }
    }

    /// Returns true once `provide` has been called on this scope or an ancestor.
    pub fn is_provided(&self) -> bool {
        self.current().is_some()
    }

    /// Returns the shared dimensions, failing if none were provided.
    pub fn use_dimensions(&self) -> Result<SharedDimensions, DimensionsError> {
        self.current().cloned().ok_or(DimensionsError::NotProvided)
    }

    /// Returns the shared dimensions, or a fresh default record when nothing was
    /// provided. The default record is not shared with anyone.
    pub fn use_or_default(&self) -> SharedDimensions {
        match self.current() {
            Some(shared) => shared.clone(),
            None => {
                warn!("Canvas dimensions not provided, using default values");
                SharedDimensions::new(CanvasDimensions::default())
            }
        }
    }
}
