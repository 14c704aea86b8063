//! # Transform Stack
//!
//! Working transform plus a LIFO of saved transforms, scoped to a single
//! traversal. Saving happens through [`TransformStack::push`], which returns
//! a guard that restores the saved transform when dropped. Pops cannot be
//! forgotten, including on early `?` returns.

use glam::DMat4;
use std::ops::{Deref, DerefMut};

/// Accumulated transform state of one traversal.
#[derive(Debug, Clone)]
pub struct TransformStack {
    working: DMat4,
    saved: Vec<DMat4>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    /// Creates an empty stack with an identity working transform.
    pub fn new() -> Self {
        Self {
            working: DMat4::IDENTITY,
            saved: Vec::new(),
        }
    }

    /// The transform currently in effect.
    #[inline]
    pub fn working(&self) -> DMat4 {
        self.working
    }

    /// Replaces the working transform.
    #[inline]
    pub fn set_working(&mut self, transform: DMat4) {
        self.working = transform;
    }

    /// Number of saved transforms.
    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Saves the working transform until the returned scope is dropped.
    pub fn push(&mut self) -> TransformScope<'_> {
        self.saved.push(self.working);
        TransformScope { stack: self }
    }

    fn pop(&mut self) {
        if let Some(saved) = self.saved.pop() {
            self.working = saved;
        }
    }
}

/// A pushed stack level. Dereferences to the stack; restores on drop.
#[derive(Debug)]
pub struct TransformScope<'a> {
    stack: &'a mut TransformStack,
}

impl Deref for TransformScope<'_> {
    type Target = TransformStack;

    fn deref(&self) -> &TransformStack {
        self.stack
    }
}

impl DerefMut for TransformScope<'_> {
    fn deref_mut(&mut self) -> &mut TransformStack {
        self.stack
    }
}

impl Drop for TransformScope<'_> {
    fn drop(&mut self) {
        self.stack.pop();
    }
}
