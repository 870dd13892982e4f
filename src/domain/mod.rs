//! Domain layer: the markup tree and its structural edits
//!
//! This layer is independent of external concerns (no file I/O, no CLI, no config loading).

pub mod arena;
pub mod edit;
pub mod error;
pub mod parser;
pub mod rules;
pub mod serializer;

pub use arena::{DomTree, Slot, TagNode, TreeIterator};
pub use edit::find_token;
pub use error::{DomainError, DomainResult};
pub use parser::MarkupParser;
pub use rules::TagRules;
