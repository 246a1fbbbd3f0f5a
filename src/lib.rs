pub mod category;
pub mod cli;
pub mod coerce;
pub mod columns;
pub mod error;
pub mod loader;
pub mod record;
pub mod source;
pub mod writer;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::category::{CategoryCatalog, CategorySeed};
use crate::cli::{BuildArgs, CheckArgs, Cli, Commands, FeedArgs, SourceArgs};
use crate::error::FeedError;
use crate::loader::{LoadOptions, LoadOutcome};
use crate::writer::ShopConfig;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("sheet2yml", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Build(args) => handle_build(&args),
        Commands::Check(args) => handle_check(&args),
    }
}

fn handle_build(args: &BuildArgs) -> Result<()> {
    let (outcome, catalog) = load_feed(&args.source, &args.feed)?;
    if outcome.records.is_empty() {
        return Err(FeedError::NoValidRecords.into());
    }
    let shop = ShopConfig {
        name: args.shop_name.clone(),
        company: args.company.clone(),
        homepage: args.homepage.clone(),
        base_currency: args.feed.base_currency.to_uppercase(),
        rates: args.rates.clone(),
        include_params: !args.skip_params,
    };
    writer::write_to_path(
        &args.output,
        &outcome.records,
        &catalog,
        &shop,
        &writer::timestamp(),
    )
    .with_context(|| format!("Writing catalog to {:?}", args.output))?;
    info!(
        "Wrote {} offer(s) across {} category(ies) to {:?}",
        outcome.records.len(),
        catalog.entries().len(),
        args.output
    );
    Ok(())
}

fn handle_check(args: &CheckArgs) -> Result<()> {
    let (outcome, _) = load_feed(&args.source, &args.feed)?;
    if outcome.records.is_empty() {
        return Err(FeedError::NoValidRecords.into());
    }
    Ok(())
}

fn load_feed(source: &SourceArgs, feed: &FeedArgs) -> Result<(LoadOutcome, CategoryCatalog)> {
    let seed = match &feed.seed {
        Some(path) => Some(
            CategorySeed::load(path)
                .with_context(|| format!("Loading category seed from {path:?}"))?,
        ),
        None => None,
    };
    let catalog = CategoryCatalog::build(feed.policy, seed, &feed.category_name)?;
    let raw = source::read(source)?;
    let options = LoadOptions {
        delimiter: source.delimiter,
        base_currency: feed.base_currency.clone(),
        fallback_vendor: feed.fallback_vendor.clone(),
        id_prefix: feed.id_prefix.clone(),
    };
    let outcome = loader::load(&raw, &catalog, &options)?;
    info!(
        "Loaded {} row(s), skipped {}; available {}/{}",
        outcome.loaded,
        outcome.skipped,
        outcome.available(),
        outcome.loaded
    );
    Ok((outcome, catalog))
}
