// src/cli/args.rs
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Session token sent as `auth-token`
    #[arg(long, value_name = "TOKEN", global = true)]
    pub token: Option<String>,

    /// Browser cookie string holding a `token=` cookie
    #[arg(long, value_name = "COOKIES", global = true)]
    pub cookie: Option<String>,

    /// Calendar-day zone as UTC offset, e.g. +02:00 (default: local zone)
    #[arg(long, value_name = "OFFSET", global = true, allow_hyphen_values = true)]
    pub utc_offset: Option<String>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute (show, export, or session)
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch notes for a code and print them as a table
    Show {
        /// Scanned code to look up (default from config)
        #[arg(short, long, value_name = "KEY")]
        key: Option<String>,

        /// Only show records from this day (YYYY-MM-DD)
        #[arg(short, long, value_name = "DATE")]
        date: Option<NaiveDate>,

        /// Output records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Fetch notes for a code and save them as a PDF table
    Export {
        /// Scanned code to look up (default from config)
        #[arg(short, long, value_name = "KEY")]
        key: Option<String>,

        /// Only export records from this day (YYYY-MM-DD)
        #[arg(short, long, value_name = "DATE")]
        date: Option<NaiveDate>,

        /// Output file (default: checkout_data.pdf in the export directory)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Open the PDF after saving
        #[arg(long)]
        open: bool,
    },

    /// Interactive table: edit key, find, pick a date, filter, export
    Session,
}
