use std::marker::PhantomData;

use crate::command::Command;
use crate::composite::{GuardedSequence, Sequence};

/// Marker type for a builder with no children.
pub struct Empty;

/// Marker type for a builder with at least one child.
pub struct HasChildren;

/// Type-state builder for composites.
///
/// `build()` only becomes available once `first()` has been called, so an
/// empty composite cannot be built statically. Use [`Sequence::new`] or
/// [`GuardedSequence::new`] when the children are only known at runtime.
///
/// ```compile_fail
/// use tally_saga::Sequence;
///
/// // Cannot build an empty sequence - `build()` is only available after `first()`
/// let sequence = Sequence::builder("empty").build();
/// ```
pub struct CompositeBuilder<Kind, State> {
    name: String,
    children: Vec<Command>,
    _phantom: PhantomData<(Kind, State)>,
}

impl<Kind> CompositeBuilder<Kind, Empty> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Add the first child.
    #[must_use]
    pub fn first(self, child: impl Into<Command>) -> CompositeBuilder<Kind, HasChildren> {
        let mut children = self.children;
        children.push(child.into());
        CompositeBuilder {
            name: self.name,
            children,
            _phantom: PhantomData,
        }
    }
}

impl<Kind> CompositeBuilder<Kind, HasChildren> {
    /// Add another child after the ones already present.
    #[must_use]
    pub fn then(mut self, child: impl Into<Command>) -> Self {
        self.children.push(child.into());
        self
    }
}

impl CompositeBuilder<Sequence, HasChildren> {
    #[must_use]
    pub fn build(self) -> Sequence {
        Sequence::from_parts(self.name, self.children)
    }
}

impl CompositeBuilder<GuardedSequence, HasChildren> {
    #[must_use]
    pub fn build(self) -> GuardedSequence {
        GuardedSequence::from_parts(self.name, self.children)
    }
}
