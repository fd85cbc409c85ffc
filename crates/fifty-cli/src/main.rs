//! `fifty` — terminal drill for the fifty US states.
//!
//! Presents one due item at a time (locate the state, or recall its name),
//! reads a self-graded recall quality from 0 to 5, and reschedules the item
//! with the SM2 policy. State lives in `sm.sqlite` in the working directory,
//! in the same table layout as the original map trainer, so an existing
//! database keeps its learning history.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use fifty_core::{ActiveItem, Mode, Scheduler, states::STATE_NAMES, store::ItemStore as _};
use fifty_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DB_PATH: &str = "sm.sqlite";

/// Takes no arguments; anything extra is rejected at parse time.
#[derive(Parser)]
#[command(name = "fifty", about = "Spaced-repetition drill for the fifty US states")]
struct Cli {}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let Cli {} = Cli::parse();

  let store = SqliteStore::open(DB_PATH)
    .with_context(|| format!("failed to open store at {DB_PATH}"))?;
  store
    .ensure_seeded(&STATE_NAMES)
    .context("failed to seed the state list")?;
  let items = store.item_count().context("counting items")?;
  tracing::info!(items, "store ready at {DB_PATH}");

  let scheduler = Scheduler::new(store);

  let stdin = io::stdin();
  let mut lines = stdin.lock().lines();

  loop {
    let Some(item) = scheduler.next().context("selecting the next item")? else {
      println!("Nothing is due. Come back later.");
      return Ok(());
    };

    present(&item);
    let Some(quality) = read_quality(&mut lines)? else {
      println!("Bye.");
      return Ok(());
    };
    scheduler
      .update(&item, quality)
      .with_context(|| format!("grading {} ({})", item.name, item.mode))?;
  }
}

/// Print the task for the item's mode.
fn present(item: &ActiveItem) {
  println!();
  match item.mode {
    Mode::Position => println!("Point to {} on a map, then check yourself.", item.name),
    Mode::Name => println!(
      "Picture the outline and position of {}. Could you have named it?",
      item.name
    ),
  }
}

/// Read a 0-5 grade from stdin. `None` on end of input or "q".
fn read_quality(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<Option<u8>> {
  loop {
    print!("grade 0-5 (q to quit): ");
    io::stdout().flush().ok();

    let Some(line) = lines.next() else {
      return Ok(None);
    };
    let line = line.context("reading stdin")?;
    let answer = line.trim();

    if answer.eq_ignore_ascii_case("q") {
      return Ok(None);
    }
    match answer.parse::<u8>() {
      Ok(q) if q <= 5 => return Ok(Some(q)),
      _ => println!("Please enter a number from 0 to 5."),
    }
  }
}
