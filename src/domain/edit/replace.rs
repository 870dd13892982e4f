use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::DomTree;

impl DomTree {
    /// Relabels every node whose label equals `old`.
    ///
    /// Returns the number of relabeled nodes; an unknown label is a no-op.
    #[instrument(level = "debug", skip(self))]
    pub fn replace_tag(&mut self, old: &str, new: &str) -> usize {
        let targets: Vec<Index> = self
            .iter()
            .filter(|(_, node)| node.label == old)
            .map(|(idx, _)| idx)
            .collect();

        for &idx in &targets {
            if let Some(node) = self.get_node_mut(idx) {
                node.label = new.to_string();
            }
        }
        debug!("relabeled {} nodes", targets.len());
        targets.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::DomTree;

    #[test]
    fn given_matching_elements_when_replacing_then_only_labels_change() {
        let mut tree: DomTree = "<html>\n<em>\nx\n</em>\n<p>\n<em>\ny\n</em>\n</p>\n</html>\n"
            .parse()
            .unwrap();
        assert_eq!(tree.replace_tag("em", "i"), 2);
        assert_eq!(
            tree.to_markup(),
            "<html>\n<i>\nx\n</i>\n<p>\n<i>\ny\n</i>\n</p>\n</html>\n"
        );
    }

    #[test]
    fn given_unknown_label_when_replacing_then_tree_is_unchanged() {
        let input = "<html>\nx\n</html>\n";
        let mut tree: DomTree = input.parse().unwrap();
        assert_eq!(tree.replace_tag("table", "div"), 0);
        assert_eq!(tree.to_markup(), input);
    }
}
