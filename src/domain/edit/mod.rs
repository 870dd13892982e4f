//! Structural edits over a [`DomTree`](crate::domain::DomTree).
//!
//! Every edit takes `&mut DomTree`, rewrites links in place and never copies
//! the tree. Traversals run on explicit work stacks.

mod add;
mod bold;
mod remove;
mod replace;

pub use add::find_token;
