use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{DomTree, Slot};
use crate::domain::error::{DomainError, DomainResult};

impl DomTree {
    /// Removes every element labeled `label`, promoting its children into its place.
    ///
    /// Labels listed in [`TagRules::list_labels`](crate::domain::TagRules) use
    /// list policy: the promoted children are relabeled to the paragraph label.
    /// Labels are compared on text leaves too, so a leaf whose text equals
    /// `label` is deleted; an element left without children then reads as a
    /// text leaf. Returns the number of removed nodes.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_tag(&mut self, label: &str) -> DomainResult<usize> {
        if self.root_node().label == label {
            return Err(DomainError::RootRemoval(label.to_string()));
        }
        let relabel = self
            .rules()
            .is_list(label)
            .then(|| self.rules().paragraph_label.clone());

        let mut removed = 0;
        let mut pending = vec![Slot::FirstChild(self.root())];

        while let Some(slot) = pending.pop() {
            let Some(idx) = self.slot_get(slot) else {
                continue;
            };
            if self.label_of(idx) != label {
                pending.push(Slot::NextSibling(idx));
                pending.push(Slot::FirstChild(idx));
                continue;
            }
            self.splice_out(slot, idx, relabel.as_deref());
            removed += 1;
            // The slot now holds the first promoted node (or the old sibling)
            pending.push(slot);
        }

        debug!("removed {} <{}> nodes", removed, label);
        Ok(removed)
    }

    /// Replaces `idx` in `slot` by its child chain followed by its sibling chain.
    #[instrument(level = "trace", skip(self))]
    fn splice_out(&mut self, slot: Slot, idx: Index, relabel: Option<&str>) {
        let rest = self.next_sibling_of(idx);
        let replacement = match self.first_child_of(idx) {
            Some(first) => {
                if let Some(paragraph) = relabel {
                    for child in self.chain(Some(first)) {
                        if let Some(node) = self.get_node_mut(child) {
                            node.label = paragraph.to_string();
                        }
                    }
                }
                let last = self.last_in_chain(first);
                self.slot_set(Slot::NextSibling(last), rest);
                Some(first)
            }
            None => rest,
        };
        self.slot_set(slot, replacement);
        if let Some(node) = self.free(idx) {
            trace!("dropped {}", node.label);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{DomTree, DomainError};

    #[test]
    fn given_plain_tag_when_removing_then_children_take_its_place() {
        let mut tree: DomTree = "<html>\na\n<b>\nb1\nb2\n</b>\nc\n</html>\n".parse().unwrap();
        assert_eq!(tree.remove_tag("b").unwrap(), 1);
        assert_eq!(tree.to_markup(), "<html>\na\nb1\nb2\nc\n</html>\n");
    }

    #[test]
    fn given_directly_nested_matches_when_removing_then_all_levels_go() {
        let mut tree: DomTree = "<html>\n<em>\n<em>\nx\n</em>\n</em>\n</html>\n".parse().unwrap();
        assert_eq!(tree.remove_tag("em").unwrap(), 2);
        assert_eq!(tree.to_markup(), "<html>\nx\n</html>\n");
    }

    #[test]
    fn given_leaf_text_equal_to_label_when_removing_then_leaf_goes_too() {
        let mut tree: DomTree = "<html>\n<p>\nb\n</p>\nx\n</html>\n".parse().unwrap();
        assert_eq!(tree.leaf_labels(), vec!["b", "x"]);
        assert_eq!(tree.remove_tag("b").unwrap(), 1);
        assert_eq!(tree.leaf_labels(), vec!["p", "x"]);
        assert_eq!(tree.to_markup(), "<html>\np\nx\n</html>\n");
    }

    #[test]
    fn given_root_label_when_removing_then_fails_without_change() {
        let input = "<html>\nx\n</html>\n";
        let mut tree: DomTree = input.parse().unwrap();
        assert!(matches!(tree.remove_tag("html"), Err(DomainError::RootRemoval(_))));
        assert_eq!(tree.to_markup(), input);
    }
}
