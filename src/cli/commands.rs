use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, IoArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{DomTree, MarkupParser};
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Show { io } => _show(cli, io),
        Commands::Tree { input } => _tree(cli, input.as_deref()),
        Commands::Replace { old, new, io } => _replace(cli, old, new, io),
        Commands::Remove { tag, io } => _remove(cli, tag, io),
        Commands::Add { word, tag, io } => _add(cli, word, tag, io),
        Commands::BoldRow { row, io } => _bold_row(cli, *row, io),
        Commands::Config { command } => _config(cli, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Parses the input file (or stdin) with the configured tag rules.
#[instrument(level = "debug", skip(cli))]
fn load_tree(cli: &Cli, input: Option<&Path>) -> CliResult<DomTree> {
    let settings = Settings::load(cli.config.as_deref())?;
    let parser = MarkupParser::new().with_rules(settings.rules());

    let tree = match input {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .map_err(|e| CliError::io(format!("open {}", path.display()), e))?;
            parser.parse_reader(BufReader::new(file))?
        }
        _ => parser.parse_reader(io::stdin().lock())?,
    };
    debug!("loaded {} nodes", tree.node_count());
    Ok(tree)
}

fn write_tree(tree: &DomTree, output: Option<&Path>) -> CliResult<()> {
    match output {
        Some(path) => fs::write(path, tree.to_markup())
            .map_err(|e| CliError::io(format!("write {}", path.display()), e)),
        None => {
            print!("{tree}");
            Ok(())
        }
    }
}

/// Status line for an edit; zero hits is reported but is not a failure.
fn report(count: usize, done: String) {
    if count == 0 {
        output::warning("nothing matched, document unchanged");
    } else {
        output::success(&done);
    }
}

/// `noun` pluralized for `count`.
fn noun(count: usize, singular: &str) -> String {
    if count == 1 {
        singular.to_string()
    } else {
        format!("{singular}s")
    }
}

#[instrument(skip(cli))]
fn _show(cli: &Cli, io: &IoArgs) -> CliResult<()> {
    let tree = load_tree(cli, io.input.as_deref())?;
    write_tree(&tree, io.output.as_deref())
}

#[instrument(skip(cli))]
fn _tree(cli: &Cli, input: Option<&Path>) -> CliResult<()> {
    let tree = load_tree(cli, input)?;
    output::info(&tree.to_tree_string()?);
    Ok(())
}

#[instrument(skip(cli))]
fn _replace(cli: &Cli, old: &str, new: &str, io: &IoArgs) -> CliResult<()> {
    let mut tree = load_tree(cli, io.input.as_deref())?;
    let count = tree.replace_tag(old, new);
    report(count, format!("renamed {count} <{old}> {} to <{new}>", noun(count, "element")));
    write_tree(&tree, io.output.as_deref())
}

#[instrument(skip(cli))]
fn _remove(cli: &Cli, tag: &str, io: &IoArgs) -> CliResult<()> {
    let mut tree = load_tree(cli, io.input.as_deref())?;
    let count = tree.remove_tag(tag)?;
    report(count, format!("removed {count} <{tag}> {}", noun(count, "element")));
    write_tree(&tree, io.output.as_deref())
}

#[instrument(skip(cli))]
fn _add(cli: &Cli, word: &str, tag: &str, io: &IoArgs) -> CliResult<()> {
    let mut tree = load_tree(cli, io.input.as_deref())?;
    let count = tree.add_tag(word, tag);
    report(count, format!("wrapped {count} {} of {word:?} in <{tag}>", noun(count, "occurrence")));
    write_tree(&tree, io.output.as_deref())
}

#[instrument(skip(cli))]
fn _bold_row(cli: &Cli, row: usize, io: &IoArgs) -> CliResult<()> {
    let mut tree = load_tree(cli, io.input.as_deref())?;
    let count = tree.bold_row(row)?;
    report(count, format!("bolded {count} {} of row {row}", noun(count, "column")));
    write_tree(&tree, io.output.as_deref())
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no home directory, global config disabled"),
        },
    }
    Ok(())
}
