//! CLI entry point for passfile.
//!
//! Parses arguments, validates the per-action requirement matrix, and
//! dispatches to the credential store. An unknown action or an incomplete
//! argument combination exits non-zero before the store is ever touched.

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use passfile_store::{Action, PasswordStore};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let cli = cli::Cli::parse();

    let action = Action::parse(&cli.action);
    if action == Action::Missing {
        bail!(
            "unknown action {:?} (expected create, verify, delete, remove, or list)",
            cli.action
        );
    }

    debug!(action = %action, file = %cli.file.display(), "dispatching");

    let mut store = PasswordStore::new(&cli.file);

    match action {
        Action::Create => {
            let user = require(cli.user.as_deref(), action, "username")?;
            let password = require(cli.password.as_deref(), action, "password")?;
            cmd_create(&mut store, user, password)
        }
        Action::Verify => {
            let user = require(cli.user.as_deref(), action, "username")?;
            let password = require(cli.password.as_deref(), action, "password")?;
            cmd_verify(&mut store, user, password)
        }
        Action::Delete | Action::Remove => {
            let user = require(cli.user.as_deref(), action, "username")?;
            cmd_delete(&mut store, user)
        }
        Action::List => cmd_list(&store),
        Action::Missing => unreachable!("rejected before dispatch"),
    }
}

/// Install the tracing subscriber. Logs go to stderr so stdout stays
/// reserved for command output; RUST_LOG overrides the default filter.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Reject a missing or empty required argument before touching the store.
fn require<'a>(value: Option<&'a str>, action: Action, what: &str) -> Result<&'a str> {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => Ok(v),
        None => bail!("action '{action}' requires a {what}"),
    }
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

fn cmd_create(store: &mut PasswordStore, user: &str, password: &str) -> Result<()> {
    store
        .create_user(user, password)
        .context("failed to create user")?;
    println!("created user '{user}'");
    Ok(())
}

fn cmd_verify(store: &mut PasswordStore, user: &str, password: &str) -> Result<()> {
    let verified = store
        .verify_user(user, password)
        .context("failed to verify user")?;

    // A clean negative verify is reported, not signalled: the exit status
    // stays zero unless the store itself failed.
    if verified {
        println!("password verified for '{user}'");
    } else {
        println!("verification failed for '{user}'");
    }
    Ok(())
}

fn cmd_delete(store: &mut PasswordStore, user: &str) -> Result<()> {
    store.delete_user(user).context("failed to delete user")?;
    println!("deleted user '{user}'");
    Ok(())
}

fn cmd_list(store: &PasswordStore) -> Result<()> {
    for username in store.list_users().context("failed to list users")? {
        println!("{username}");
    }
    Ok(())
}

// ── tests ────────────────────────────────────────────────────────────
