//! Renders a tree back into the line grammar the parser reads.

use std::fmt;

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::DomTree;

enum Step {
    Enter(Index),
    Close(Index),
}

impl DomTree {
    /// One line per leaf, `<label>`/`</label>` around every element.
    #[instrument(level = "debug", skip(self))]
    pub fn to_lines(&self) -> Vec<String> {
        self.subtree_lines(self.root())
    }

    /// Serializes `idx` and its descendants; siblings of `idx` are not included.
    pub fn subtree_lines(&self, idx: Index) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack = vec![Step::Enter(idx)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(current) => {
                    let Some(node) = self.get_node(current) else {
                        continue;
                    };
                    // Pushed first so it runs after the whole subtree is closed
                    if current != idx {
                        if let Some(sibling) = node.next_sibling {
                            stack.push(Step::Enter(sibling));
                        }
                    }
                    match node.first_child {
                        None => out.push(node.label.clone()),
                        Some(child) => {
                            out.push(format!("<{}>", node.label));
                            stack.push(Step::Close(current));
                            stack.push(Step::Enter(child));
                        }
                    }
                }
                Step::Close(current) => {
                    if let Some(node) = self.get_node(current) {
                        out.push(format!("</{}>", node.label));
                    }
                }
            }
        }
        out
    }

    /// The serialized document, every line terminated by `\n`.
    pub fn to_markup(&self) -> String {
        let mut markup = String::new();
        for line in self.to_lines() {
            markup.push_str(&line);
            markup.push('\n');
        }
        markup
    }
}

impl fmt::Display for DomTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.to_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
