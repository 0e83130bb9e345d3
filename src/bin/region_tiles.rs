//! Dump blocked and bridge tiles for map regions stored in a zip archive
//!
//! Run with: cargo run --bin region-tiles -- --archive maps.zip --xz 50,50

use std::path::PathBuf;

use clap::Parser;
use region_tiles::archive::open_zip;
use region_tiles::{IndexKind, MapLoader, MatchPolicy, RegionId, RegionTiles};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "region-tiles")]
#[command(about = "Decode map region terrain and list blocked and bridge tiles")]
struct Args {
    /// Zip archive whose entries are map groups (m{x}_{z}, l{x}_{z}, ...)
    #[arg(long)]
    archive: PathBuf,

    /// Packed region id, (x << 8) | z
    #[arg(long = "region")]
    regions: Vec<u16>,

    /// Region as x,z
    #[arg(long = "xz", value_parser = parse_xz)]
    xz: Vec<RegionId>,

    /// Resolve name hash collisions to the first matching group
    #[arg(long)]
    first_match: bool,

    /// Print tiles as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct RegionOutput {
    region: RegionId,
    #[serde(flatten)]
    tiles: RegionTiles,
}

fn parse_xz(s: &str) -> Result<RegionId, String> {
    let (x, z) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,z, got {s:?}"))?;
    let x: u8 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let z: u8 = z.trim().parse().map_err(|e| format!("bad z: {e}"))?;
    Ok(RegionId::from_xz(x, z))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut regions: Vec<RegionId> = args.regions.iter().copied().map(RegionId::new).collect();
    regions.extend(args.xz.iter().copied());
    if regions.is_empty() {
        return Err("no regions given; use --region or --xz".into());
    }

    let store = open_zip(&args.archive, IndexKind::Maps)?;
    let policy = if args.first_match {
        MatchPolicy::FirstMatch
    } else {
        MatchPolicy::LastMatch
    };
    let loader = MapLoader::new(store).with_policy(policy);

    let mut outputs = Vec::new();
    let mut failures = 0;
    for (region, result) in loader.load_regions(&regions) {
        match result {
            Ok(tiles) => outputs.push(RegionOutput { region, tiles }),
            Err(e) if e.is_absent() => {
                eprintln!("Region {}: {}", region, e);
                outputs.push(RegionOutput { region, tiles: RegionTiles::default() });
            }
            Err(e) => {
                eprintln!("Region {}: {}", region, e);
                failures += 1;
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    } else {
        for out in &outputs {
            println!(
                "Region {}: {} blocked, {} bridge",
                out.region,
                out.tiles.blocked.len(),
                out.tiles.bridge.len()
            );
        }
    }

    if failures > 0 {
        return Err(format!("{} region(s) failed to decode", failures).into());
    }
    Ok(())
}
