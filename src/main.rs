//! Command-line front end for the reading-state stores.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml` (or `--config`).
//! - Open the stores and run one command against them.

mod cli;

use crate::cli::{Command, parse_args};
use anyhow::{Context, Result};
use lectern_core::config::load_config;
use lectern_core::{BROWN_SHADES, ReaderStores, Rgb, THEME_COLORS};
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const DEFAULT_CONFIG_PATH: &str = "conf/config.toml";

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let config_path = args
        .config_path
        .as_deref()
        .unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
    let config = load_config(config_path);
    if std::env::var_os("RUST_LOG").is_none() {
        set_log_level(reload_handle, config.log_level.as_filter_str());
    }
    info!(
        data_dir = %config.data_dir,
        namespace = %config.namespace,
        level = %config.log_level,
        "Starting lectern"
    );

    let stores = ReaderStores::open(&config);
    execute(&stores, args.command)
}

fn execute(stores: &ReaderStores, command: Command) -> Result<()> {
    match command {
        Command::List => {
            for record in stores.bookmarks.all() {
                println!(
                    "{:>3}  {:<12} {}  {}",
                    record.order_index, record.short_name, record.color_hex, record.id
                );
            }
        }
        Command::Add { book, chapter } => {
            let record = stores.bookmarks.add(&book, chapter);
            stores.current.set(Some(&record));
            println!("{} {}", record.short_name, record.id);
        }
        Command::Delete { id } => stores.delete_bookmark(id),
        Command::Color { id, color } => {
            let rgb = Rgb::from_hex(&color)
                .with_context(|| format!("Not a #RRGGBB color: {color}"))?;
            stores.bookmarks.update_color(id, &rgb.to_hex());
        }
        Command::Move { id, position } => {
            let record = stores
                .bookmarks
                .find(id)
                .with_context(|| format!("No bookmark with id {id}"))?;
            let mut ordered = stores.bookmarks.all();
            ordered.retain(|other| other.id != id);
            ordered.insert(position.min(ordered.len()), record);
            stores.bookmarks.reorder(&ordered);
        }
        Command::Current => match stores.current.get() {
            Some(record) => println!("{} {}", record.short_name, record.id),
            None => println!("no current bookmark"),
        },
        Command::ClearCurrent => stores.current.clear(),
        Command::Read {
            book,
            chapter,
            scroll,
        } => stores.settle(&book, chapter, scroll),
        Command::Resume => {
            match stores.navigation.reading_position() {
                Some(pos) => println!(
                    "reading: {} {} @ {:.1} ({})",
                    pos.book_name, pos.chapter, pos.scroll_position, pos.timestamp
                ),
                None => println!("reading: none"),
            }
            match stores.navigation.last_non_bookmark() {
                Some(pos) => println!(
                    "return to: {} {} @ {:.1} (chapter offset {:.1})",
                    pos.book_name,
                    pos.chapter,
                    pos.scroll_position,
                    stores.navigation.chapter_scroll(&pos.book_name, pos.chapter)
                ),
                None => println!("return to: none"),
            }
        }
        Command::Palette => {
            println!("brown shades: {}", BROWN_SHADES.join(" "));
            println!("theme colors: {}", THEME_COLORS.join(" "));
        }
    }
    Ok(())
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed) {
        warn!(%level, "Failed to update log level from config: {err}");
    }
}
