//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Edit line-oriented nested markup: rename, remove and add tags, bold table rows
#[derive(Parser, Debug)]
#[command(name = "tagtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where markup is read from and written to.
#[derive(Args, Debug, Clone)]
pub struct IoArgs {
    /// Markup file, stdin when omitted or "-"
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse and re-serialize a document
    Show {
        #[command(flatten)]
        io: IoArgs,
    },

    /// Show the document as an indented tree
    Tree {
        /// Markup file, stdin when omitted or "-"
        #[arg(value_hint = ValueHint::FilePath)]
        input: Option<PathBuf>,
    },

    /// Rename every occurrence of a tag
    Replace {
        /// Tag to rename
        old: String,
        /// New tag name
        new: String,
        #[command(flatten)]
        io: IoArgs,
    },

    /// Remove a tag, keeping its content (lists turn items into paragraphs)
    Remove {
        /// Tag to remove
        tag: String,
        #[command(flatten)]
        io: IoArgs,
    },

    /// Wrap a word in a new tag
    Add {
        /// Word to look for (case-insensitive)
        word: String,
        /// Tag to wrap it in
        tag: String,
        #[command(flatten)]
        io: IoArgs,
    },

    /// Bold every column of a table row
    BoldRow {
        /// Row number, starting at 1
        row: usize,
        #[command(flatten)]
        io: IoArgs,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Print the global config file location
    Path,
}
