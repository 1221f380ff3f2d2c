use crate::core::{BodyHandle, ConstraintHandle};
use crate::error::PhysicsError;
use crate::Result;

use thunderdome as td;

/// Generic storage trait for physics objects
pub trait Storage<T, H> {
    /// Creates a new empty storage
    fn new() -> Self;

    /// Adds an item to the storage and returns its handle
    fn add(&mut self, item: T) -> H;

    /// Gets a reference to an item by its handle
    fn get(&self, handle: H) -> Option<&T>;

    /// Gets a mutable reference to an item by its handle
    fn get_mut(&mut self, handle: H) -> Option<&mut T>;

    /// Removes an item from the storage, handing ownership back to the caller
    fn remove(&mut self, handle: H) -> Option<T>;

    /// Returns the number of items in the storage
    fn len(&self) -> usize;

    /// Returns whether the storage is empty
    fn is_empty(&self) -> bool;

    /// Drops all items in the storage
    fn clear(&mut self);

    /// Returns all handles in slot order
    fn handles(&self) -> Vec<H>;

    /// Returns an iterator over all items in slot order
    fn iter<'a>(&'a self) -> impl Iterator<Item = (H, &'a T)> + 'a where T: 'a;

    /// Returns a mutable iterator over all items in slot order
    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (H, &'a mut T)> + 'a where T: 'a;
}

/// Arena storage for physics bodies.
///
/// Iteration follows slot order, so pairwise collision tests visit
/// pairs in the same order on every run.
pub struct BodyStorage<T> {
    items: td::Arena<T>,
}

impl<T> Storage<T, BodyHandle> for BodyStorage<T> {
    fn new() -> Self {
        Self { items: td::Arena::new() }
    }

    fn add(&mut self, item: T) -> BodyHandle {
        BodyHandle(self.items.insert(item))
    }

    fn get(&self, handle: BodyHandle) -> Option<&T> {
        self.items.get(handle.0)
    }

    fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut T> {
        self.items.get_mut(handle.0)
    }

    fn remove(&mut self, handle: BodyHandle) -> Option<T> {
        self.items.remove(handle.0)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn handles(&self) -> Vec<BodyHandle> {
        self.items.iter().map(|(index, _)| BodyHandle(index)).collect()
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (BodyHandle, &'a T)> + 'a where T: 'a {
        self.items.iter().map(|(index, item)| (BodyHandle(index), item))
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (BodyHandle, &'a mut T)> + 'a where T: 'a {
        self.items.iter_mut().map(|(index, item)| (BodyHandle(index), item))
    }
}

impl<T> BodyStorage<T> {
    /// Gets a body by its handle, returning an error if not found
    pub fn get_body(&self, handle: BodyHandle) -> Result<&T> {
        self.get(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))
    }

    /// Gets a mutable reference to a body by its handle, returning an error if not found
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut T> {
        self.get_mut(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle)))
    }

    /// Gets mutable references to two distinct bodies at once
    pub fn get_pair_mut(&mut self, a: BodyHandle, b: BodyHandle) -> Result<(&mut T, &mut T)> {
        if a == b {
            return Err(PhysicsError::InvalidParameter(format!(
                "body {:?} cannot be paired with itself",
                a
            )));
        }

        match self.items.get2_mut(a.0, b.0) {
            (Some(body_a), Some(body_b)) => Ok((body_a, body_b)),
            (None, _) => Err(PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", a))),
            (_, None) => Err(PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", b))),
        }
    }
}

/// Arena storage for physics constraints
pub struct ConstraintStorage<T> {
    items: td::Arena<T>,
}

impl<T> Storage<T, ConstraintHandle> for ConstraintStorage<T> {
    fn new() -> Self {
        Self { items: td::Arena::new() }
    }

    fn add(&mut self, item: T) -> ConstraintHandle {
        ConstraintHandle(self.items.insert(item))
    }

    fn get(&self, handle: ConstraintHandle) -> Option<&T> {
        self.items.get(handle.0)
    }

    fn get_mut(&mut self, handle: ConstraintHandle) -> Option<&mut T> {
        self.items.get_mut(handle.0)
    }

    fn remove(&mut self, handle: ConstraintHandle) -> Option<T> {
        self.items.remove(handle.0)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn handles(&self) -> Vec<ConstraintHandle> {
        self.items.iter().map(|(index, _)| ConstraintHandle(index)).collect()
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (ConstraintHandle, &'a T)> + 'a where T: 'a {
        self.items.iter().map(|(index, item)| (ConstraintHandle(index), item))
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (ConstraintHandle, &'a mut T)> + 'a where T: 'a {
        self.items.iter_mut().map(|(index, item)| (ConstraintHandle(index), item))
    }
}

impl<T> ConstraintStorage<T> {
    /// Gets a constraint by its handle, returning an error if not found
    pub fn get_constraint(&self, handle: ConstraintHandle) -> Result<&T> {
        self.get(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("Constraint with handle {:?} not found", handle)))
    }

    /// Gets a mutable reference to a constraint by its handle, returning an error if not found
    pub fn get_constraint_mut(&mut self, handle: ConstraintHandle) -> Result<&mut T> {
        self.get_mut(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("Constraint with handle {:?} not found", handle)))
    }
}
