//! Tree model and structural edits for a line-oriented nested markup format.
//!
//! A document such as
//!
//! ```text
//! <html>
//! <body>
//! the cat. sat
//! </body>
//! </html>
//! ```
//!
//! is parsed into a [`DomTree`], edited in place with
//! [`replace_tag`](DomTree::replace_tag), [`remove_tag`](DomTree::remove_tag),
//! [`add_tag`](DomTree::add_tag) or [`bold_row`](DomTree::bold_row), and
//! serialized back with [`to_markup`](DomTree::to_markup).

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use domain::{DomTree, DomainError, DomainResult, MarkupParser, TagNode, TagRules};
