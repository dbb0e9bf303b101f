// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree nodes and the arena that owns them.

use alloc::vec::Vec;

use crate::rect::CellRect;

/// Stable index of a node in the arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// Which child slot of an internal node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left = 0,
    Right = 1,
}

impl Side {
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

pub(crate) enum Kind<T> {
    Leaf(T),
    Internal {
        children: [NodeIdx; 2],
        height: u32,
    },
}

pub(crate) struct Node<T> {
    pub(crate) parent: Option<NodeIdx>,
    pub(crate) boundary: CellRect,
    pub(crate) kind: Kind<T>,
}

impl<T> Node<T> {
    pub(crate) const fn leaf(boundary: CellRect, item: T) -> Self {
        Self {
            parent: None,
            boundary,
            kind: Kind::Leaf(item),
        }
    }

    #[inline]
    pub(crate) const fn height(&self) -> u32 {
        match self.kind {
            Kind::Leaf(_) => 0,
            Kind::Internal { height, .. } => height,
        }
    }

    #[inline]
    pub(crate) const fn children(&self) -> Option<[NodeIdx; 2]> {
        match self.kind {
            Kind::Leaf(_) => None,
            Kind::Internal { children, .. } => Some(children),
        }
    }

    #[inline]
    pub(crate) fn item(&self) -> Option<&T> {
        match &self.kind {
            Kind::Leaf(item) => Some(item),
            Kind::Internal { .. } => None,
        }
    }
}

/// Slot storage for nodes, with a free list for reuse.
///
/// Indices stay valid until the node is freed. Rotations relink nodes in place
/// and never allocate.
pub(crate) struct Arena<T> {
    nodes: Vec<Option<Node<T>>>,
    free_list: Vec<usize>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_list: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(leaves: usize) -> Self {
        // n leaves need n - 1 internal nodes.
        Self {
            nodes: Vec::with_capacity(leaves.saturating_mul(2)),
            free_list: Vec::new(),
        }
    }

    pub(crate) fn alloc(&mut self, node: Node<T>) -> NodeIdx {
        if let Some(i) = self.free_list.pop() {
            self.nodes[i] = Some(node);
            NodeIdx(i)
        } else {
            self.nodes.push(Some(node));
            NodeIdx(self.nodes.len() - 1)
        }
    }

    pub(crate) fn free(&mut self, idx: NodeIdx) -> Node<T> {
        let node = self.nodes[idx.0].take().expect("dangling NodeIdx");
        self.free_list.push(idx.0);
        node
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
    }

    /// Number of live nodes.
    pub(crate) fn live(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Number of slots, live or free.
    pub(crate) fn slots(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn node(&self, idx: NodeIdx) -> &Node<T> {
        self.nodes[idx.0].as_ref().expect("dangling NodeIdx")
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, idx: NodeIdx) -> &mut Node<T> {
        self.nodes[idx.0].as_mut().expect("dangling NodeIdx")
    }

    #[inline]
    pub(crate) fn boundary(&self, idx: NodeIdx) -> CellRect {
        self.node(idx).boundary
    }

    #[inline]
    pub(crate) fn height(&self, idx: NodeIdx) -> u32 {
        self.node(idx).height()
    }

    #[inline]
    pub(crate) fn parent(&self, idx: NodeIdx) -> Option<NodeIdx> {
        self.node(idx).parent
    }

    /// Child of an internal node.
    #[inline]
    pub(crate) fn child(&self, idx: NodeIdx, side: Side) -> NodeIdx {
        self.children(idx)[side.slot()]
    }

    #[inline]
    pub(crate) fn children(&self, idx: NodeIdx) -> [NodeIdx; 2] {
        self.node(idx)
            .children()
            .expect("leaf has no children")
    }

    /// Which side of its parent `idx` hangs on, or `None` for the root.
    pub(crate) fn side_of(&self, idx: NodeIdx) -> Option<(NodeIdx, Side)> {
        let parent = self.parent(idx)?;
        let [left, _] = self.children(parent);
        let side = if left == idx { Side::Left } else { Side::Right };
        Some((parent, side))
    }

    /// Hang `child` under `parent` on `side`, fixing the back-reference.
    pub(crate) fn set_child(&mut self, parent: NodeIdx, side: Side, child: NodeIdx) {
        if let Kind::Internal { children, .. } = &mut self.node_mut(parent).kind {
            children[side.slot()] = child;
        } else {
            unreachable!("set_child on a leaf");
        }
        self.node_mut(child).parent = Some(parent);
    }

    /// Descend via left children to the leftmost leaf under `idx`.
    pub(crate) fn leftmost_leaf(&self, mut idx: NodeIdx) -> NodeIdx {
        while let Some([left, _]) = self.node(idx).children() {
            idx = left;
        }
        idx
    }
}
