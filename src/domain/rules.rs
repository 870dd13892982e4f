//! Label vocabulary the tag mutators work with.

/// Labels and character sets the structural edits rely on.
///
/// The defaults are the fixed vocabulary of the line-markup format; settings
/// may override them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRules {
    /// Tags removed with list policy (children become paragraphs)
    pub list_labels: Vec<String>,
    /// Label given to the immediate children of a removed list
    pub paragraph_label: String,
    /// Wrapper label inserted by `bold_row`
    pub bold_label: String,
    /// Element `bold_row` searches for first
    pub body_label: String,
    /// Element below body whose children are rows
    pub table_label: String,
    /// Characters allowed directly after a word matched by `add_tag`
    pub trailing_punctuation: Vec<char>,
    /// Resume `add_tag` scanning at the text remaining after a wrapped word
    pub rescan_remainder: bool,
}

impl Default for TagRules {
    fn default() -> Self {
        Self {
            list_labels: vec!["ol".into(), "ul".into()],
            paragraph_label: "p".into(),
            bold_label: "bold".into(),
            body_label: "body".into(),
            table_label: "table".into(),
            trailing_punctuation: vec!['!', '?', '.', ';', ':'],
            rescan_remainder: false,
        }
    }
}

impl TagRules {
    pub fn is_list(&self, label: &str) -> bool {
        self.list_labels.iter().any(|l| l == label)
    }

    pub fn is_trailing_punctuation(&self, c: char) -> bool {
        self.trailing_punctuation.contains(&c)
    }
}
