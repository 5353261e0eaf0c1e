//! courseplan: a course catalog held in a binary search tree.
//!
//! Layers, innermost first:
//! - [`domain`]: course records, source line parsing and the ordered [`domain::CourseStore`]
//! - [`application`]: the catalog service that loads sources and resolves prerequisites
//! - [`infrastructure`]: filesystem boundary and service wiring
//! - [`cli`]: argument parsing, commands and the interactive menu session

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
