//! Command dispatch

use std::io;
use std::path::Path;
use std::sync::Arc;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::{CatalogService, LoadReport};
use crate::application::IoResultExt;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::session::{format_course_detail, Session};
use crate::cli::{CliError, CliResult};
use crate::config::global_config_path;
use crate::config::Settings;
use crate::infrastructure::ServiceContainer;

pub fn execute_command(cli: &Cli, container: &ServiceContainer) -> CliResult<()> {
    match &cli.command {
        None => cmd_menu(container, None),
        Some(Commands::Menu { file }) => cmd_menu(container, file.as_deref()),
        Some(Commands::List { file }) => cmd_list(container, file),
        Some(Commands::Show { file, code }) => cmd_show(container, file, code),
        Some(Commands::Tree { file }) => cmd_tree(container, file),
        Some(Commands::Config { command }) => cmd_config(container, command, cli.config.as_deref()),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
    }
}

#[instrument(skip(container))]
fn cmd_menu(container: &ServiceContainer, file: Option<&Path>) -> CliResult<()> {
    let stdin = io::stdin();
    let mut session = Session::new(
        container.catalog_service(),
        Arc::clone(&container.settings),
        stdin.lock(),
        io::stdout(),
    );
    if let Some(file) = file {
        session.load_file(file)?;
    }
    session.run()?;
    Ok(())
}

/// Load `file` into a fresh catalog, warning about skipped lines.
fn load_catalog(container: &ServiceContainer, file: &Path) -> CliResult<CatalogService> {
    let mut catalog = container.catalog_service();
    let report = catalog.load(file)?;
    warn_skipped(&report);
    Ok(catalog)
}

fn warn_skipped(report: &LoadReport) {
    for skipped in &report.skipped {
        output::warning(&format!("line {}: {}", skipped.line_number, skipped.reason));
    }
}

#[instrument(skip(container))]
fn cmd_list(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let catalog = load_catalog(container, file)?;
    output::header(&container.settings.list_header);
    catalog.store().for_each_in_order(|course| output::info(course));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, file: &Path, code: &str) -> CliResult<()> {
    let catalog = load_catalog(container, file)?;
    let detail = catalog.describe(code)?;
    for line in format_course_detail(&detail) {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer, file: &Path) -> CliResult<()> {
    let catalog = load_catalog(container, file)?;
    let store = catalog.store();
    output::info(&store.to_tree_string());
    output::action("courses", &store.len());
    output::action("depth", &store.depth());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_config(
    container: &ServiceContainer,
    command: &ConfigCommands,
    local: Option<&Path>,
) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => {
                    let state = if container.fs.exists(&path) { "" } else { " (not found)" };
                    output::action("global", &format!("{}{}", path.display(), state));
                }
                None => output::action("global", "unavailable"),
            }
            if let Some(local) = local {
                output::action("local", &local.display());
            }
        }
        ConfigCommands::Init { force } => {
            let path = global_config_path()
                .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
            if container.fs.exists(&path) && !force {
                return Err(CliError::Usage(format!(
                    "config already exists: {} (use --force to overwrite)",
                    path.display()
                )));
            }
            debug!("writing config template to {}", path.display());
            container
                .fs
                .ensure_parent(&path)
                .with_path_context("create config dir", &path)?;
            container
                .fs
                .write(&path, &Settings::template())
                .with_path_context("write config", &path)?;
            output::success(&format!("created {}", path.display()));
        }
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
