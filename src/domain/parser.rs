//! Line grammar reader: `<name>` opens, `</name>` closes, anything else is text.

use std::io::BufRead;
use std::str::FromStr;

use generational_arena::Index;
use regex::Regex;
use tracing::{debug, instrument};

use crate::domain::arena::{DomTree, Slot, TagNode};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::rules::TagRules;

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Open(&'a str),
    Close(&'a str),
    Text(&'a str),
}

/// Builds a [`DomTree`] from a forward-only sequence of lines.
///
/// Open elements are tracked on an explicit stack together with their last
/// attached child, so nesting depth is limited by memory only.
pub struct MarkupParser {
    tag_regex: Regex,
    rules: TagRules,
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupParser {
    pub fn new() -> Self {
        Self {
            tag_regex: Regex::new(r"^<(/?)([^<>/][^<>]*)>$").unwrap(),
            rules: TagRules::default(),
        }
    }

    /// Rules handed to every tree this parser builds.
    pub fn with_rules(mut self, rules: TagRules) -> Self {
        self.rules = rules;
        self
    }

    fn classify<'a>(&self, line: &'a str, line_no: usize) -> DomainResult<Line<'a>> {
        if !line.starts_with('<') {
            return Ok(Line::Text(line));
        }
        let caps = self
            .tag_regex
            .captures(line)
            .ok_or_else(|| DomainError::malformed(line_no, format!("invalid tag line {line:?}")))?;
        let name = caps.get(2).map_or("", |m| m.as_str());
        if caps.get(1).is_some_and(|m| !m.as_str().is_empty()) {
            Ok(Line::Close(name))
        } else {
            Ok(Line::Open(name))
        }
    }

    pub fn parse_lines<I, S>(&self, lines: I) -> DomainResult<DomTree>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.parse(lines.into_iter().map(Ok))
    }

    pub fn parse_str(&self, input: &str) -> DomainResult<DomTree> {
        self.parse_lines(input.lines())
    }

    pub fn parse_reader<R: BufRead>(&self, reader: R) -> DomainResult<DomTree> {
        self.parse(reader.lines().map(|line| line.map_err(DomainError::from)))
    }

    /// Parses lines that may fail to be produced (e.g. while reading a file).
    #[instrument(level = "debug", skip_all)]
    pub fn parse<I, S>(&self, lines: I) -> DomainResult<DomTree>
    where
        I: IntoIterator<Item = DomainResult<S>>,
        S: AsRef<str>,
    {
        let mut lines = lines.into_iter().enumerate().map(|(i, line)| (i + 1, line));

        let (first_no, first) = lines
            .next()
            .ok_or_else(|| DomainError::malformed(1, "empty input"))?;
        let first = first?;
        let root_label = match self.classify(first.as_ref(), first_no)? {
            Line::Open(name) => name.to_string(),
            _ => {
                return Err(DomainError::malformed(
                    first_no,
                    "document must start with an opening tag",
                ))
            }
        };

        let mut tree = DomTree::new(root_label).with_rules(self.rules.clone());
        // (open element, its last attached child)
        let mut open: Vec<(Index, Option<Index>)> = vec![(tree.root(), None)];
        let mut last_no = first_no;

        for (line_no, line) in lines {
            let line = line?;
            let line = line.as_ref();
            last_no = line_no;

            let Some(&(parent, _)) = open.last() else {
                if line.trim().is_empty() {
                    continue;
                }
                return Err(DomainError::malformed(
                    line_no,
                    "content after the root element was closed",
                ));
            };

            match self.classify(line, line_no)? {
                Line::Close(name) => {
                    let expected = tree.label_of(parent);
                    if expected != name {
                        return Err(DomainError::malformed(
                            line_no,
                            format!("expected </{expected}>, found </{name}>"),
                        ));
                    }
                    open.pop();
                }
                Line::Open(name) => {
                    let idx = attach(&mut tree, &mut open, name);
                    open.push((idx, None));
                }
                Line::Text(text) => {
                    attach(&mut tree, &mut open, text);
                }
            }
        }

        if let Some(&(unclosed, _)) = open.last() {
            return Err(DomainError::malformed(
                last_no,
                format!("input ended before </{}>", tree.label_of(unclosed)),
            ));
        }

        debug!("parsed {} nodes", tree.node_count());
        Ok(tree)
    }
}

/// Links a new node after the last child of the innermost open element.
fn attach(tree: &mut DomTree, open: &mut [(Index, Option<Index>)], label: &str) -> Index {
    let idx = tree.alloc(TagNode::new(label));
    if let Some((parent, last)) = open.last_mut() {
        let slot = match *last {
            Some(prev) => Slot::NextSibling(prev),
            None => Slot::FirstChild(*parent),
        };
        tree.slot_set(slot, Some(idx));
        *last = Some(idx);
    }
    idx
}

impl DomTree {
    pub fn parse_lines<I, S>(lines: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        MarkupParser::new().parse_lines(lines)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> DomainResult<Self> {
        MarkupParser::new().parse_reader(reader)
    }
}

impl FromStr for DomTree {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MarkupParser::new().parse_str(s)
    }
}
