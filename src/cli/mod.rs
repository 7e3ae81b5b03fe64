//! CLI module - Command-line interface for Rapport
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Rapport - accounts and friendships over HTTP
#[derive(Parser)]
#[command(name = "rapport")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve {
        /// Use an in-memory database that is discarded on exit
        #[arg(long)]
        ephemeral: bool,
    },

    /// Create default config file
    Init,

    /// Manage accounts
    #[command(alias = "accounts")]
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },

    /// Inspect friendships
    Friends {
        #[command(subcommand)]
        command: FriendsCommands,
    },
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Register a new account
    Create {
        username: String,
        password: String,
    },
    /// List all accounts
    #[command(alias = "ls")]
    List,
    /// Show one account
    Show { username: String },
    /// Mark an account inactive
    Disable { username: String },
    /// Permanently delete an account and its friendships
    #[command(alias = "rm")]
    Delete { username: String },
    /// Check a password against the stored hash
    Verify { username: String, password: String },
}

#[derive(Subcommand)]
pub enum FriendsCommands {
    /// List accepted friends of an account
    #[command(alias = "ls")]
    List {
        /// Account ID
        user_id: String,
    },
    /// List pending requests addressed to an account
    Incoming {
        /// Account ID
        user_id: String,
    },
}

pub use commands::*;
