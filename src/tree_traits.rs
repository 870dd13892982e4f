/*
Indented view of a markup tree, rendered through termtree.
Element nodes show as `<label>`, text leaves as their quoted text.
 */
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{DomTree, DomainError, DomainResult};

/// Deepest document the view renders. termtree formats and drops its nested
/// values recursively, so deeper documents are refused instead of built.
pub const MAX_VIEW_DEPTH: usize = 1_000;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> DomainResult<Tree<String>>;
}

enum Step {
    Enter(Index),
    Close(Index),
}

impl TreeNodeConvert for DomTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> DomainResult<Tree<String>> {
        fn display_label(tree: &DomTree, idx: Index) -> String {
            match tree.get_node(idx) {
                Some(node) if node.is_leaf() => format!("{:?}", node.label),
                Some(node) => format!("<{}>", node.label),
                None => String::new(),
            }
        }

        let depth = self.depth();
        if depth > MAX_VIEW_DEPTH {
            return Err(DomainError::TooDeep {
                depth,
                max: MAX_VIEW_DEPTH,
            });
        }

        // Children of every element still open, innermost last
        let mut built: Vec<Vec<Tree<String>>> = Vec::new();
        let mut stack = vec![Step::Enter(self.root())];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(idx) => {
                    built.push(Vec::new());
                    stack.push(Step::Close(idx));
                    for child in self.children(idx).into_iter().rev() {
                        stack.push(Step::Enter(child));
                    }
                }
                Step::Close(idx) => {
                    let mut node = Tree::new(display_label(self, idx));
                    for child in built.pop().unwrap_or_default() {
                        node.push(child);
                    }
                    match built.last_mut() {
                        Some(parent) => parent.push(node),
                        None => return Ok(node),
                    }
                }
            }
        }
        Ok(Tree::new(display_label(self, self.root())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested(levels: usize) -> String {
        let mut input = "<div>\n".repeat(levels);
        input.push_str("leaf\n");
        input.push_str(&"</div>\n".repeat(levels));
        input
    }

    #[test]
    fn given_document_when_rendering_tree_then_lists_nodes_indented() {
        let tree: DomTree = "<html>\n<p>\nhello\n</p>\nbye\n</html>\n".parse().unwrap();
        let rendered = tree.to_tree_string().unwrap().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "<html>");
        assert!(lines[1].ends_with("<p>"));
        assert!(lines[2].ends_with("\"hello\""));
        assert!(lines[3].ends_with("\"bye\""));
    }

    #[test]
    fn given_document_at_depth_limit_when_rendering_tree_then_succeeds() {
        let tree: DomTree = nested(MAX_VIEW_DEPTH - 1).parse().unwrap();
        assert_eq!(tree.depth(), MAX_VIEW_DEPTH);
        let rendered = tree.to_tree_string().unwrap().to_string();
        assert_eq!(rendered.lines().count(), MAX_VIEW_DEPTH);
        assert!(rendered.lines().last().unwrap().ends_with("\"leaf\""));
    }

    #[test]
    fn given_very_deep_document_when_rendering_tree_then_refuses() {
        let tree: DomTree = nested(100_000).parse().unwrap();
        assert!(matches!(
            tree.to_tree_string(),
            Err(DomainError::TooDeep {
                depth: 100_001,
                max: MAX_VIEW_DEPTH
            })
        ));
    }
}
