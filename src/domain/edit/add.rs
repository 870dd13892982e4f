use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{DomTree, TagNode};
use crate::domain::rules::TagRules;

/// Byte offset and length of the first token in `text` that matches `word`.
///
/// Tokens are whitespace-delimited. A token matches when it equals `word`
/// ignoring case, or when it is `word` followed by one trailing punctuation
/// character from `rules`.
pub fn find_token(text: &str, word: &str, rules: &TagRules) -> Option<(usize, usize)> {
    if word.is_empty() {
        return None;
    }
    let word = word.to_lowercase();
    let mut start = None;

    for (i, c) in text.char_indices().chain(std::iter::once((text.len(), ' '))) {
        if !c.is_whitespace() {
            start.get_or_insert(i);
            continue;
        }
        let Some(s) = start.take() else {
            continue;
        };
        let token = &text[s..i];
        if token_matches(token, &word, rules) {
            return Some((s, i - s));
        }
    }
    None
}

fn token_matches(token: &str, word: &str, rules: &TagRules) -> bool {
    if token.to_lowercase() == word {
        return true;
    }
    let mut chars = token.chars();
    match chars.next_back() {
        Some(last) if rules.is_trailing_punctuation(last) => chars.as_str().to_lowercase() == word,
        _ => false,
    }
}

impl DomTree {
    /// Wraps the first occurrence of `word` in every text leaf with a `tag` element.
    ///
    /// Returns the number of wrapped occurrences; zero means nothing matched.
    #[instrument(level = "debug", skip(self))]
    pub fn add_tag(&mut self, word: &str, tag: &str) -> usize {
        let root = self.root();
        let mut wrapped = 0;
        let mut pending = vec![root];

        while let Some(idx) = pending.pop() {
            let next = self.next_sibling_of(idx);
            if let Some(child) = self.first_child_of(idx) {
                if let Some(sibling) = next {
                    pending.push(sibling);
                }
                pending.push(child);
                continue;
            }
            if idx == root {
                continue;
            }

            match find_token(self.label_of(idx), word, self.rules()) {
                Some((index, len)) => {
                    let resume = self.wrap_token(idx, index, len, tag);
                    wrapped += 1;
                    if let Some(resume) = resume {
                        pending.push(resume);
                    }
                }
                None => {
                    if let Some(sibling) = next {
                        pending.push(sibling);
                    }
                }
            }
        }

        debug!("wrapped {} occurrences of {:?}", wrapped, word);
        wrapped
    }

    /// Splits leaf `idx` around `[index, index + len)` and wraps the middle.
    ///
    /// Returns the node scanning continues with.
    #[instrument(level = "trace", skip(self))]
    fn wrap_token(&mut self, idx: Index, index: usize, len: usize, tag: &str) -> Option<Index> {
        let text = self.label_of(idx).to_string();
        let (before, rest) = text.split_at(index);
        let (matched, after) = rest.split_at(len);
        trace!(before, matched, after, "splitting leaf");

        let original_next = self.next_sibling_of(idx);
        let matched_leaf = self.alloc(TagNode::new(matched));
        let continuation = if after.is_empty() {
            original_next
        } else {
            Some(self.alloc(TagNode {
                label: after.to_string(),
                first_child: None,
                next_sibling: original_next,
            }))
        };

        if before.is_empty() {
            // The leaf itself becomes the wrapper
            if let Some(node) = self.get_node_mut(idx) {
                node.label = tag.to_string();
                node.first_child = Some(matched_leaf);
                node.next_sibling = continuation;
            }
        } else {
            let wrapper = self.alloc(TagNode {
                label: tag.to_string(),
                first_child: Some(matched_leaf),
                next_sibling: continuation,
            });
            if let Some(node) = self.get_node_mut(idx) {
                node.label = before.to_string();
                node.next_sibling = Some(wrapper);
            }
        }

        if self.rules().rescan_remainder {
            continuation
        } else {
            original_next
        }
    }
}
