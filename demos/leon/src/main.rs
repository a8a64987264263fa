//! leon — evacuation routes for the barangays of Leon, Iloilo.
//!
//! With `--data-dir`, loads a folder holding the road KML and the
//! `*_to_<Barangay>.csv` measurement tables.  Without it, runs the built-in
//! nine-barangay scenario, where every road falls back to the distance-based
//! cost because no measurements are present.
//!
//! ```text
//! leon --data-dir data --goal bobon
//! leon --data-dir data --all --seed 7
//! leon --near 10.85,122.34 --goal poblacion
//! RUST_LOG=debug leon --goal gin
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use ev_core::GeoPoint;
use ev_data::{leon, load_dir, Dataset, LoadOptions, RouteGeometry, SeededCurvature};
use ev_network::{EvacNetwork, NetworkHandle, RouteKind, RouteOutcome, RouteSearch};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Folder with the KML file and segment tables (built-in scenario if absent)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Village to route from (defaults to the evacuation centre)
    #[arg(long)]
    start: Option<String>,

    /// Route from the village nearest to this point, given as "LAT,LON"
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true, conflicts_with = "start")]
    near: Option<GeoPoint>,

    /// Destination name or fragment, e.g. "bob" for Bobon
    #[arg(long)]
    goal: Option<String>,

    /// Seed for synthesised road curvature
    #[arg(long, default_value_t = SeededCurvature::DEFAULT_SEED)]
    seed: u64,

    /// Route to every selectable village and print a summary table
    #[arg(long)]
    all: bool,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let (network, geometry) = match &cli.data_dir {
        Some(dir) => {
            let Dataset { network, geometry, geometry_report, segment_report } =
                load_dir(dir, LoadOptions { curvature_seed: cli.seed })
                    .with_context(|| format!("loading {}", dir.display()))?;
            println!("Route geometry: {geometry_report}");
            println!("Segment tables: {segment_report}");
            for (what, why) in geometry_report.failed.iter().chain(&segment_report.failed) {
                println!("  failed: {what}: {why}");
            }
            (network, geometry)
        }
        None => {
            info!("no --data-dir; using the built-in Leon scenario");
            (leon::builder()?.build(), RouteGeometry::default())
        }
    };

    let handle = NetworkHandle::new(network);
    let net = handle.snapshot();

    print_overview(&net, &geometry);

    let start = match (&cli.start, cli.near, net.centre()) {
        (Some(name), _, _) => name.clone(),
        (None, Some(pos), _) => {
            let Some(v) = net.villages().nearest(pos) else {
                bail!("no villages loaded");
            };
            let name = net.villages().name(v).to_string();
            println!("Nearest village to {pos}: {name}");
            name
        }
        (None, None, Some(c)) => net.villages().name(c).to_string(),
        (None, None, None) => bail!("no evacuation centre configured; pass --start or --near"),
    };
    let search = RouteSearch::new(&net);

    if cli.all {
        print_all(&net, &search, &start);
    }

    if let Some(goal) = &cli.goal {
        println!();
        match search.best_route(&start, goal) {
            Some(route) => print_route(&net, &geometry, &start, &route),
            None => println!("No route from {start} to anything matching {goal:?}."),
        }
    } else if !cli.all {
        println!();
        println!("Pass --goal <name> or --all to plan a route.");
    }

    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_overview(net: &EvacNetwork, geometry: &RouteGeometry) {
    println!("=== Leon evacuation route planner ===");
    match net.centre() {
        Some(c) => println!("Evacuation centre: {}", net.villages().name(c)),
        None => println!("Evacuation centre: (none)"),
    }
    println!(
        "Villages: {}  |  Roads: {}  |  With segment data: {}  |  Route paths: {}",
        net.villages().len(),
        net.graph().edge_count(),
        net.segments().villages_with_data(),
        geometry.len()
    );
    let selectable: Vec<&str> = net.selectable().map(|v| net.villages().name(v)).collect();
    println!("Selectable: {}", selectable.join(", "));
}

fn print_all(net: &EvacNetwork, search: &RouteSearch<'_>, start: &str) {
    println!();
    println!("{:<12} {:>8} {:>10} {:>10}  {:<6}", "Village", "Cost", "Time(min)", "Dist(km)", "Kind");
    for v in net.selectable() {
        let name = net.villages().name(v);
        if name.eq_ignore_ascii_case(start) {
            continue;
        }
        // Exact name so fragments do not pull in other villages.
        match search.best_route(start, name).filter(|r| r.village == v) {
            Some(r) => println!(
                "{:<12} {:>8.3} {:>10.1} {:>10}  {:<6}",
                name,
                r.cost,
                r.time_min,
                distance_text(r.distance_km),
                kind_text(r.kind)
            ),
            None => println!("{name:<12} {:>8} {:>10} {:>10}", "-", "-", "-"),
        }
    }
}

fn print_route(net: &EvacNetwork, geometry: &RouteGeometry, start: &str, route: &RouteOutcome) {
    let dest = net.villages().name(route.village);
    let path: Vec<&str> = route.path.iter().map(|&v| net.villages().name(v)).collect();

    println!("Best route: {start} → {dest}");
    println!("  Path:       {}", path.join(" → "));
    println!("  Kind:       {}", kind_text(route.kind));
    println!("  Fuzzy cost: {:.3}", route.cost);
    println!("  Time:       {:.1} min", route.time_min);
    println!("  Distance:   {} km", distance_text(route.distance_km));

    let alternatives = net.distances().alternatives(route.village);
    if !alternatives.is_empty() {
        let listed: Vec<String> = alternatives.iter().map(|km| format!("{km} km")).collect();
        println!("  All available paths: {}", listed.join(", "));
    }

    let origin = net
        .centre()
        .map(|c| net.villages().name(c))
        .unwrap_or(start);
    match geometry.path_between(origin, dest) {
        Some((name, points)) => println!("  Map polyline: {name:?} ({} points)", points.len()),
        None => println!("  Map polyline: none for {origin} to {dest}"),
    }
}

fn parse_point(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {s:?}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("latitude {lat:?}: {e}"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("longitude {lon:?}: {e}"))?;
    Ok(GeoPoint::new(lat, lon))
}

fn distance_text(km: Option<f64>) -> String {
    km.map_or_else(|| "N/A".to_string(), |d| format!("{d:.2}"))
}

fn kind_text(kind: RouteKind) -> &'static str {
    match kind {
        RouteKind::Graph => "graph",
        RouteKind::Direct => "direct",
    }
}
