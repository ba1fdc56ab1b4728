//! Support for cycle detection while expanding compound glyphs.

use std::ops::{Deref, DerefMut};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum DecyclerError {
    DepthLimitExceeded,
    CycleDetected,
}

/// Cycle detector for a depth first walk of the component graph.
///
/// Nodes are identified by values of type `T` and the walk depth is limited
/// to the constant `D`. This is Floyd's tortoise and hare applied to the
/// current traversal chain: on entry the new node is compared against the
/// node halfway up the chain, so any cycle is reported after at most two
/// trips around it.
///
/// The chain lives in a fixed size array indexed by depth. We need a depth
/// limit to bound recursion anyway.
pub(crate) struct Decycler<T, const D: usize> {
    node_ids: [T; D],
    depth: usize,
}

impl<T, const D: usize> Decycler<T, D>
where
    T: Copy + PartialEq + Default,
{
    pub fn new() -> Self {
        Self {
            node_ids: [T::default(); D],
            depth: 0,
        }
    }

    /// Current depth of the walk.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Enters the node identified by `node_id`.
    ///
    /// On success, returns a guard that derefs to the decycler and restores
    /// the previous depth when dropped, so that it can be handed to the
    /// recursive call that visits the node's children.
    pub fn enter(&mut self, node_id: T) -> Result<DecyclerGuard<'_, T, D>, DecyclerError> {
        if self.depth >= D {
            return Err(DecyclerError::DepthLimitExceeded);
        }
        if self.depth != 0 && self.node_ids[self.depth / 2] == node_id {
            return Err(DecyclerError::CycleDetected);
        }
        self.node_ids[self.depth] = node_id;
        self.depth += 1;
        Ok(DecyclerGuard { decycler: self })
    }
}

impl<T, const D: usize> Default for Decycler<T, D>
where
    T: Copy + PartialEq + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct DecyclerGuard<'a, T, const D: usize> {
    decycler: &'a mut Decycler<T, D>,
}

impl<T, const D: usize> Deref for DecyclerGuard<'_, T, D> {
    type Target = Decycler<T, D>;

    fn deref(&self) -> &Self::Target {
        self.decycler
    }
}

impl<T, const D: usize> DerefMut for DecyclerGuard<'_, T, D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.decycler
    }
}

impl<T, const D: usize> Drop for DecyclerGuard<'_, T, D> {
    fn drop(&mut self) {
        self.decycler.depth -= 1;
    }
}
