//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Course planner: load a course catalog and query it interactively
#[derive(Parser, Debug)]
#[command(name = "courseplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Additional config file (overrides the global config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath, env = "COURSEPLAN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive course planner menu (default)
    Menu {
        /// Course file to load before the menu starts
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Print all courses in alphanumeric order
    List {
        /// Course file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Print one course with its prerequisites
    Show {
        /// Course file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Course code, e.g. CSCI300 (case-insensitive)
        code: String,
    },

    /// Show the shape of the course search tree
    Tree {
        /// Course file
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
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
    /// Show merged config
    Show,

    /// Create global config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
