// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{bail, Context, Result};
use application::{FetchOutcome, NoteTableController};
use chrono::NaiveDate;
use cli::args::{Args, Command};
use cli::session::Session;
use domain::DayBoundary;
use infrastructure::{
    Config, CookieToken, CredentialChain, EnvToken, HttpNoteSource, PdfFileExporter, StaticToken,
};
use ports::TablePresenter;
use std::io::Write;
use tracing::{debug, info};

type Controller = NoteTableController<HttpNoteSource<CredentialChain>>;

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notedash with arguments");

    let config = load_config(&args)?;
    let boundary = config.day_boundary()?;
    debug!(?config, ?boundary, "Resolved configuration");

    // Single-threaded event loop; the fetch is the only suspension point.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    match args.command.clone() {
        Command::Show { key, date, json } => {
            let controller = runtime.block_on(load_table(&config, &args, boundary, key, date))?;
            let mut stdout = std::io::stdout().lock();
            if json {
                let json = serde_json::to_string_pretty(controller.visible_records())?;
                writeln!(stdout, "{json}")?;
            } else {
                let presenter =
                    TablePresenter::new(boundary).with_date_format(config.table.date_format.clone());
                write!(stdout, "{}", presenter.render(controller.visible_records()))?;
            }
        }
        Command::Export {
            key,
            date,
            output,
            open,
        } => {
            let controller = runtime.block_on(load_table(&config, &args, boundary, key, date))?;
            let mut exporter = PdfFileExporter::new(
                output.unwrap_or_else(|| config.export_path()),
                boundary,
                config.table.date_format.clone(),
            )
            .open_after_save(open);
            let saved = controller.export_current_view(&mut exporter)?;
            println!("Saved {}", saved.display());
        }
        Command::Session => {
            let controller = build_controller(&config, &args, boundary)?;
            let presenter =
                TablePresenter::new(boundary).with_date_format(config.table.date_format.clone());
            let exporter =
                PdfFileExporter::new(config.export_path(), boundary, config.table.date_format.clone());
            let mut session = Session::new(controller, presenter, exporter);
            let stdin = std::io::stdin().lock();
            let mut stdout = std::io::stdout();
            runtime.block_on(session.run(stdin, &mut stdout))?;
        }
    }

    Ok(())
}

/// Config file first, then command-line overrides.
pub fn load_config(args: &Args) -> Result<Config> {
    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(base_url) = &args.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(offset) = &args.utc_offset {
        config.table.utc_offset = Some(offset.clone());
    }
    config.validate()?;
    Ok(config)
}

/// `--token`, then `--cookie`, then the configured environment variable.
pub fn credential_chain(args: &Args, config: &Config) -> CredentialChain {
    let mut chain = CredentialChain::new();
    if let Some(token) = &args.token {
        chain = chain.with(StaticToken::new(token.clone()));
    }
    if let Some(cookies) = &args.cookie {
        chain = chain.with(CookieToken::new(cookies.clone()));
    }
    chain.with(EnvToken::new(config.auth.token_env.clone()))
}

fn build_controller(config: &Config, args: &Args, boundary: DayBoundary) -> Result<Controller> {
    let source = HttpNoteSource::with_timeout(
        config.api.base_url.clone(),
        credential_chain(args, config),
        config.timeout(),
    )?;
    Ok(NoteTableController::new(source, config.table.default_query_key.clone())
        .with_day_boundary(boundary))
}

async fn load_table(
    config: &Config,
    args: &Args,
    boundary: DayBoundary,
    key: Option<String>,
    date: Option<NaiveDate>,
) -> Result<Controller> {
    let mut controller = build_controller(config, args, boundary)?;
    if let Some(key) = key {
        controller.set_query_key(key);
    }

    info!(query_key = controller.query_key(), "Fetching notes");
    match controller.find().await {
        FetchOutcome::Applied { .. } => {}
        FetchOutcome::Skipped => bail!("Query key is empty; nothing to fetch"),
        FetchOutcome::Stale { seq } => bail!("Fetch {seq} was superseded"),
        FetchOutcome::Failed(e) => {
            return Err(e).with_context(|| {
                format!("Could not load notes for '{}'", controller.query_key())
            })
        }
    }

    if date.is_some() {
        controller.select_date(date);
        controller.apply_filter();
    }
    Ok(controller)
}
