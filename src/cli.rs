//! Argument parsing for the `lectern` binary.

use anyhow::{Context, Result, anyhow, bail};
use std::path::PathBuf;
use uuid::Uuid;

const USAGE: &str = "Usage: lectern [--config PATH] <list | add BOOK CHAPTER | delete ID | \
color ID #RRGGBB | move ID POSITION | current [clear] | read BOOK CHAPTER [SCROLL] | resume | palette>";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Add { book: String, chapter: u32 },
    Delete { id: Uuid },
    Color { id: Uuid, color: String },
    Move { id: Uuid, position: usize },
    Current,
    ClearCurrent,
    Read { book: String, chapter: u32, scroll: f64 },
    Resume,
    Palette,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub config_path: Option<PathBuf>,
    pub command: Command,
}

pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut args = args.into_iter().peekable();
    let mut config_path = None;
    if args.peek().map(String::as_str) == Some("--config") {
        args.next();
        let path = args.next().ok_or_else(|| anyhow!("--config needs a path"))?;
        config_path = Some(PathBuf::from(path));
    }

    let name = args.next().ok_or_else(|| anyhow!(USAGE))?;
    let rest: Vec<String> = args.collect();
    let command = match (name.as_str(), rest.as_slice()) {
        ("list", []) => Command::List,
        ("add", [book, chapter]) => Command::Add {
            book: book.clone(),
            chapter: parse_chapter(chapter)?,
        },
        ("delete", [id]) => Command::Delete { id: parse_id(id)? },
        ("color", [id, color]) => Command::Color {
            id: parse_id(id)?,
            color: color.clone(),
        },
        ("move", [id, position]) => Command::Move {
            id: parse_id(id)?,
            position: position
                .parse()
                .with_context(|| format!("Invalid position: {position}"))?,
        },
        ("current", []) => Command::Current,
        ("current", [sub]) if sub == "clear" => Command::ClearCurrent,
        ("read", [book, chapter]) => Command::Read {
            book: book.clone(),
            chapter: parse_chapter(chapter)?,
            scroll: 0.0,
        },
        ("read", [book, chapter, scroll]) => Command::Read {
            book: book.clone(),
            chapter: parse_chapter(chapter)?,
            scroll: parse_scroll(scroll)?,
        },
        ("resume", []) => Command::Resume,
        ("palette", []) => Command::Palette,
        _ => bail!(USAGE),
    };
    Ok(Args {
        config_path,
        command,
    })
}

fn parse_chapter(raw: &str) -> Result<u32> {
    let chapter: u32 = raw
        .parse()
        .with_context(|| format!("Invalid chapter: {raw}"))?;
    if chapter == 0 {
        bail!("Chapter numbers start at 1");
    }
    Ok(chapter)
}

fn parse_scroll(raw: &str) -> Result<f64> {
    let scroll: f64 = raw
        .parse()
        .with_context(|| format!("Invalid scroll offset: {raw}"))?;
    if !scroll.is_finite() {
        bail!("Scroll offset must be a finite number: {raw}");
    }
    Ok(scroll)
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("Invalid bookmark id: {raw}"))
}
