use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use log::info;

use tabletop_hexmap::{
    map_string::{self, MapStringLoad},
    table::{MemoryTable, SystemCatalog, Table, TableConfig},
};

/// Lay a map string out on an empty table and print where every tile goes.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// e.g. "18 25a2 0 26b ..."
    map_string: String,

    #[arg(long)]
    players: Option<u8>,

    /// Use the larger hex scale
    #[arg(long)]
    larger: bool,

    /// Base game only
    #[arg(long)]
    no_pok: bool,

    #[arg(long)]
    skip_mallice: bool,

    /// Saved table config (JSON); flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Homebrew systems (JSON array)
    #[arg(long)]
    homebrew: Option<PathBuf>,

    /// Print placements as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => TableConfig::load(path)?,
        None => TableConfig::default(),
    };
    if let Some(players) = args.players {
        config.set_player_count(players)?;
    }
    if args.larger {
        config.set_larger_scale(true);
    }
    if args.no_pok {
        config.set_pok(false);
    }

    let mut catalog = SystemCatalog::standard();
    if let Some(path) = &args.homebrew {
        let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let added = catalog.inject_json(&json)?;
        info!("{added} homebrew systems from {}", path.display());
    }

    let session = config.begin_session();
    let mut table = MemoryTable::default();
    for desk in session.desks() {
        table.add_generic_home_system(desk.player_slot, desk.center);
    }

    let loader = MapStringLoad::new(&session, &catalog);
    let directives = loader.directives(&args.map_string, args.skip_mallice, table.table_height())?;
    let report = loader.load(&mut table, &args.map_string, args.skip_mallice)?;
    let homes = loader.move_generic_home_systems(&mut table, &args.map_string)?;
    info!("{} moved, {} spawned, {} home systems dealt", report.moved, report.spawned, homes.len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&directives)?);
    } else {
        for d in &directives {
            let p = d.placement.position;
            let kind = if d.home { "home" } else if d.hyperlane { "lane" } else { "" };
            println!("{:>4} {:<12} ({:8.3}, {:8.3}) yaw {:5.1} roll {:5.1} {:<4}  {}",
                d.tile, d.hex.to_string(), p.x, p.y, d.placement.rotation.yaw, d.placement.rotation.roll, kind, d.nsid);
        }
        for (slot, hex) in &homes {
            println!("home slot {slot:>2} -> {hex}");
        }
    }

    println!("{}", map_string::save(&table, session.layout(), loader.index()));
    Ok(())
}
