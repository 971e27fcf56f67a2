use std::{env, fs};

use anyhow::Context;
use totp_shelf::{
    action::Action,
    config::Config,
    manager::Manager,
    store::{MemoryStore, SessionId},
};

pub fn main() -> anyhow::Result<()> {
    let mut args = env::args().skip(1);
    let entries_path = args
        .next()
        .context("usage: totp-dashboard <entries.json> [config.toml]")?;

    // Fall back to 30 second windows and 6 digits
    let config = match args.next() {
        Some(path) => Config::load(&path).with_context(|| format!("loading {path}"))?,
        None => Config::default(),
    };

    let json = fs::read_to_string(&entries_path)
        .with_context(|| format!("reading {entries_path}"))?;

    // A single local session stands in for the browser one
    let manager = Manager::new(MemoryStore::new(), config);
    let session = SessionId::new("local");
    manager.handle(&session, Action::Import { json })?;

    let dashboard = manager.dashboard(&session, None)?;
    if dashboard.rows.is_empty() {
        println!("No entries yet.");
    }

    for row in &dashboard.rows {
        println!("{:>3}  {:<24} {}", row.index, row.name, row.code);
    }
    println!("Remaining time: {}s", dashboard.seconds_remaining);

    Ok(())
}
