//! CLI argument definitions for passfile.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! validating and dispatching the requested action.

use std::path::PathBuf;

use clap::Parser;

/// passfile -- manage a flat-file credential store.
#[derive(Parser)]
#[command(
    name = "passfile",
    version,
    about = "Manage a flat-file credential store",
    long_about = "Creates, verifies, removes, and lists username/password-hash pairs \
                  persisted as a plain text file, for basic-auth style gateways."
)]
pub struct Cli {
    /// Path to the password file.
    pub file: PathBuf,

    /// Action to perform: create, verify, delete, remove, or list
    /// (case-insensitive).
    pub action: String,

    /// Username (required for every action except list).
    pub user: Option<String>,

    /// Password (required for create and verify).
    pub password: Option<String>,
}
