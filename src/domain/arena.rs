use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::rules::TagRules;

/// A node of the document: an element when it has children, a text leaf otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNode {
    /// Tag name for elements, literal text for leaves
    pub label: String,
    /// Start of the child chain, None for leaves
    pub(crate) first_child: Option<Index>,
    /// Next node on the same level
    pub(crate) next_sibling: Option<Index>,
}

impl TagNode {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            first_child: None,
            next_sibling: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }
}

impl fmt::Display for TagNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// The incoming edge that owns a node.
///
/// Every node except the root is owned by exactly one slot: either its parent's
/// first-child link or its previous sibling's next-sibling link. Splicing code
/// receives the slot by value and rewrites only that edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    FirstChild(Index),
    NextSibling(Index),
}

/// Arena-backed markup tree in first-child/next-sibling encoding.
///
/// Links are generational indices into the arena, so no two live mutable
/// references into the tree ever exist. Cloning performs a deep copy.
#[derive(Debug, Clone)]
pub struct DomTree {
    arena: Arena<TagNode>,
    root: Index,
    rules: TagRules,
}

impl DomTree {
    /// Creates a tree consisting of a single root element without children.
    pub fn new(root_label: impl Into<String>) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TagNode::new(root_label));
        Self {
            arena,
            root,
            rules: TagRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: TagRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &TagRules {
        &self.rules
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn root_node(&self) -> &TagNode {
        &self.arena[self.root]
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, idx: Index) -> Option<&TagNode> {
        self.arena.get(idx)
    }

    pub(crate) fn get_node_mut(&mut self, idx: Index) -> Option<&mut TagNode> {
        self.arena.get_mut(idx)
    }

    /// Changes the label of a live node; links are left untouched.
    /// Returns false for a stale index.
    pub fn set_label(&mut self, idx: Index, label: impl Into<String>) -> bool {
        match self.arena.get_mut(idx) {
            Some(node) => {
                node.label = label.into();
                true
            }
            None => false,
        }
    }

    /// Allocates a detached node. The caller must link it into a slot.
    pub(crate) fn alloc(&mut self, node: TagNode) -> Index {
        self.arena.insert(node)
    }

    /// Drops a node that has already been unlinked from the tree.
    pub(crate) fn free(&mut self, idx: Index) -> Option<TagNode> {
        self.arena.remove(idx)
    }

    pub(crate) fn label_of(&self, idx: Index) -> &str {
        &self.arena[idx].label
    }

    pub(crate) fn first_child_of(&self, idx: Index) -> Option<Index> {
        self.arena[idx].first_child
    }

    pub(crate) fn next_sibling_of(&self, idx: Index) -> Option<Index> {
        self.arena[idx].next_sibling
    }

    /// Reads the node currently held by a slot.
    pub(crate) fn slot_get(&self, slot: Slot) -> Option<Index> {
        match slot {
            Slot::FirstChild(owner) => self.arena[owner].first_child,
            Slot::NextSibling(owner) => self.arena[owner].next_sibling,
        }
    }

    /// Points a slot at a new occupant.
    pub(crate) fn slot_set(&mut self, slot: Slot, value: Option<Index>) {
        match slot {
            Slot::FirstChild(owner) => self.arena[owner].first_child = value,
            Slot::NextSibling(owner) => self.arena[owner].next_sibling = value,
        }
    }

    /// Follows the sibling chain starting at `start` to its last node.
    pub(crate) fn last_in_chain(&self, start: Index) -> Index {
        let mut current = start;
        while let Some(next) = self.arena[current].next_sibling {
            current = next;
        }
        current
    }

    /// Indices of the chain starting at `start`, in order.
    pub(crate) fn chain(&self, start: Option<Index>) -> Vec<Index> {
        let mut out = Vec::new();
        let mut current = start;
        while let Some(idx) = current {
            out.push(idx);
            current = self.arena[idx].next_sibling;
        }
        out
    }

    /// Children of `idx` in document order.
    pub fn children(&self, idx: Index) -> Vec<Index> {
        self.arena
            .get(idx)
            .map(|node| self.chain(node.first_child))
            .unwrap_or_default()
    }

    /// Pre-order walk over all nodes reachable from the root.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order walk over `idx` and its descendants (its siblings excluded).
    pub fn iter_from(&self, idx: Index) -> TreeIterator<'_> {
        TreeIterator::new(self, idx)
    }

    /// Number of nodes reachable from the root.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 1)];
        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for child in self.children(idx) {
                stack.push((child, depth + 1));
            }
        }
        max_depth
    }

    /// Labels of all leaf nodes in document order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_labels(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.label.clone())
            .collect()
    }

    /// Number of nodes carrying `label`.
    pub fn count_label(&self, label: &str) -> usize {
        self.iter().filter(|(_, node)| node.label == label).count()
    }

    /// First node labeled `label` in pre-order below (and including) `start`.
    pub fn find_descendant(&self, start: Index, label: &str) -> Option<Index> {
        self.iter_from(start)
            .find(|(_, node)| node.label == label)
            .map(|(idx, _)| idx)
    }
}

pub struct TreeIterator<'a> {
    tree: &'a DomTree,
    start: Index,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a DomTree, start: Index) -> Self {
        let stack = if tree.get_node(start).is_some() {
            vec![start]
        } else {
            Vec::new()
        };
        Self { tree, start, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TagNode);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.tree.get_node(current_idx)?;
        // Sibling goes below the child so the child chain is visited first
        if current_idx != self.start {
            if let Some(sibling) = node.next_sibling {
                self.stack.push(sibling);
            }
        }
        if let Some(child) = node.first_child {
            self.stack.push(child);
        }
        Some((current_idx, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DomTree {
        // <html> <body> a b </body> c </html>
        let mut tree = DomTree::new("html");
        let body = tree.alloc(TagNode::new("body"));
        let a = tree.alloc(TagNode::new("a"));
        let b = tree.alloc(TagNode::new("b"));
        let c = tree.alloc(TagNode::new("c"));
        let root = tree.root();
        tree.slot_set(Slot::FirstChild(root), Some(body));
        tree.slot_set(Slot::FirstChild(body), Some(a));
        tree.slot_set(Slot::NextSibling(a), Some(b));
        tree.slot_set(Slot::NextSibling(body), Some(c));
        tree
    }

    #[test]
    fn given_tree_when_iterating_then_visits_in_document_order() {
        let tree = sample();
        let labels: Vec<_> = tree.iter().map(|(_, n)| n.label.as_str()).collect();
        assert_eq!(labels, vec!["html", "body", "a", "b", "c"]);
    }

    #[test]
    fn given_subtree_start_when_iterating_then_excludes_its_siblings() {
        let tree = sample();
        let body = tree.find_descendant(tree.root(), "body").unwrap();
        let labels: Vec<_> = tree.iter_from(body).map(|(_, n)| n.label.as_str()).collect();
        assert_eq!(labels, vec!["body", "a", "b"]);
    }

    #[test]
    fn given_tree_when_measuring_then_reports_depth_and_leaves() {
        let tree = sample();
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.leaf_labels(), vec!["a", "b", "c"]);
    }

    #[test]
    fn given_chain_when_seeking_last_then_returns_tail() {
        let tree = sample();
        let body = tree.find_descendant(tree.root(), "body").unwrap();
        let a = tree.first_child_of(body).unwrap();
        assert_eq!(tree.label_of(tree.last_in_chain(a)), "b");
    }

    #[test]
    fn given_clone_when_mutating_copy_then_original_is_untouched() {
        let tree = sample();
        let mut copy = tree.clone();
        let root = copy.root();
        assert!(copy.set_label(root, "changed"));
        assert_eq!(tree.root_node().label, "html");
        assert_eq!(copy.root_node().label, "changed");
    }

    #[test]
    fn given_freed_node_when_setting_label_then_reports_stale_index() {
        let mut tree = sample();
        let body = tree.find_descendant(tree.root(), "body").unwrap();
        let a = tree.first_child_of(body).unwrap();
        let before = tree.to_lines();
        assert!(tree.set_label(a, "z"));
        assert_eq!(tree.label_of(a), "z");
        assert_eq!(tree.to_lines().len(), before.len());

        let detached = tree.alloc(TagNode::new("gone"));
        tree.free(detached);
        assert!(!tree.set_label(detached, "back"));
    }
}
