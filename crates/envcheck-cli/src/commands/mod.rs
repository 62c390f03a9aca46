//! Subcommand implementations.

pub mod check;
pub mod compare;
pub mod generate;
pub mod get;
pub mod init;
pub mod list;
pub mod list_types;
pub mod monorepo;
pub mod output;
