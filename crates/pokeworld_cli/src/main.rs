mod script;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use pokeworld_core::{
    estimate_capture_rate, AttackOutcome, CatalogLookup, Coordinate, CreatureRecord, FixedLocation,
    GameConfig, ItemKind, Session, SimulationRng, StaticCatalog, TelemetryConfig, DEFAULT_SEED,
};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use script::Intent;

#[derive(Parser)]
#[command(version, about = "Walk around, catch creatures and battle trainers from a terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a session, reading intents from a script file or stdin.
    Play(PlayArgs),
    /// Print one generation cycle of nearby creatures and trainers as JSON.
    Generate(GenerateArgs),
    /// Estimate capture rates per item kind.
    Odds(OddsArgs),
}

#[derive(Args)]
struct WorldArgs {
    /// TOML game config; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Latitude of the position fix. Without a fix the default location is used.
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct PlayArgs {
    #[command(flatten)]
    world: WorldArgs,
    /// File with one intent per line; stdin when omitted.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Write the final snapshot here as JSON.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Sleep through battle delays instead of skipping ahead.
    #[arg(long)]
    realtime: bool,
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    world: WorldArgs,
}

#[derive(Args)]
struct OddsArgs {
    #[arg(long, default_value_t = 10_000)]
    trials: u32,
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
    /// Catalog id of the practice target.
    #[arg(long, default_value_t = 25)]
    species: u32,
}

#[derive(Serialize)]
struct OddsRow {
    item: ItemKind,
    trials: u32,
    expected: f64,
    observed: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Play(args) => handle_play(args).await,
        Commands::Generate(args) => handle_generate(args).await,
        Commands::Odds(args) => handle_odds(args).await,
    }
}

async fn handle_play(args: PlayArgs) -> Result<()> {
    let config = load_config(&args.world)?;
    let seed = config.simulation.seed;
    let catalog = load_catalog(&config)?;
    let mut rng = SimulationRng::new(seed);
    let mut session = start_session(config, &args.world, Arc::clone(&catalog), &mut rng).await;
    print_nearby(&session);

    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("failed to open script {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(intent) = Intent::parse_line(&line)
            .with_context(|| format!("line {}: `{}`", idx + 1, line.trim()))?
        else {
            continue;
        };
        apply_intent(&mut session, intent, &catalog, &mut rng, args.realtime).await;
        for notification in session.take_notifications() {
            println!("[{:>7}ms] {}", notification.posted_at_ms, notification.message);
        }
    }

    let snapshot = session.snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    if let Some(path) = args.report.as_ref() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let report = serde_json::json!({
            "timestamp": Utc::now().to_rfc3339(),
            "seed": seed,
            "snapshot": snapshot,
        });
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}

async fn handle_generate(args: GenerateArgs) -> Result<()> {
    let config = load_config(&args.world)?;
    let catalog = load_catalog(&config)?;
    let mut rng = SimulationRng::new(config.simulation.seed);
    let session = start_session(config, &args.world, catalog, &mut rng).await;
    let cycle = serde_json::json!({
        "location": session.player().location(),
        "creatures": session.nearby_creatures(),
        "trainers": session.nearby_trainers(),
    });
    println!("{}", serde_json::to_string_pretty(&cycle)?);
    Ok(())
}

async fn handle_odds(args: OddsArgs) -> Result<()> {
    init_tracing(&TelemetryConfig::default());
    let catalog = StaticCatalog::first_generation()?;
    let data = catalog
        .fetch_creature(args.species)
        .await
        .with_context(|| format!("species {} is not in the catalog", args.species))?;
    let target = CreatureRecord::from_catalog(0, data, Coordinate::new(0.0, 0.0), 0.0, 0.0);

    let mut rng = SimulationRng::new(args.seed);
    let rows: Vec<OddsRow> = ItemKind::ALL
        .iter()
        .map(|&item| OddsRow {
            item,
            trials: args.trials,
            expected: item.capture_rate(),
            observed: estimate_capture_rate(&target, item, args.trials, &mut rng),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn load_config(world: &WorldArgs) -> Result<GameConfig> {
    let mut config = match &world.config {
        Some(path) => GameConfig::from_path(path)?.with_env_overrides(),
        None => GameConfig::from_env(),
    };
    if let Some(seed) = world.seed {
        config.simulation.seed = seed;
    }
    init_tracing(&config.telemetry);
    Ok(config)
}

fn init_tracing(telemetry: &TelemetryConfig) {
    let fallback = telemetry.trace_filter.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

fn load_catalog(config: &GameConfig) -> Result<Arc<dyn CatalogLookup>> {
    let catalog = match config.catalog.path.as_deref() {
        Some(path) => StaticCatalog::from_path(path)?,
        None => StaticCatalog::first_generation()?,
    };
    info!(target: "pokeworld.cli", species = catalog.len(), "catalog loaded");
    Ok(Arc::new(catalog))
}

async fn start_session(
    config: GameConfig,
    world: &WorldArgs,
    catalog: Arc<dyn CatalogLookup>,
    rng: &mut SimulationRng,
) -> Session {
    let source = match (world.lat, world.lng) {
        (Some(lat), Some(lng)) => FixedLocation::new(Coordinate::new(lat, lng)),
        _ => FixedLocation::unavailable(),
    };
    let mut session = Session::new(config);
    session.locate(&source).await;
    if let Err(err) = session.refresh_nearby(catalog, rng).await {
        warn!(target: "pokeworld.cli", error = %err, "initial generation skipped");
    }
    session
}

async fn apply_intent(
    session: &mut Session,
    intent: Intent,
    catalog: &Arc<dyn CatalogLookup>,
    rng: &mut SimulationRng,
    realtime: bool,
) {
    let result = match intent {
        Intent::Creature(id) => session.select_creature(id).map(|()| {
            if let Some(capture) = session.capture() {
                let target = capture.target();
                println!("A wild {} ({}m away)!", target.name, target.distance_meters);
            }
        }),
        Intent::Trainer(id) => session.select_trainer(id).map(|_| print_battle(session)),
        Intent::Throw(item) => session.attempt_capture(item, rng).map(|_| ()),
        Intent::Flee => {
            session.flee();
            Ok(())
        }
        Intent::Attack => match session.attack(rng) {
            Ok(AttackOutcome::Hit { damage, .. }) => {
                println!("You hit for {damage}.");
                print_battle(session);
                run_delays(session, rng, realtime).await;
                Ok(())
            }
            Ok(AttackOutcome::Victory { damage, .. }) => {
                println!("You hit for {damage}. The opponent is down!");
                Ok(())
            }
            Ok(AttackOutcome::Ignored) => Ok(()),
            Err(err) => Err(err),
        },
        Intent::Buy(item) => session.purchase(item),
        Intent::Recenter => {
            let at = session.recenter();
            println!("Centered on {:.4}, {:.4}", at.lat, at.lng);
            Ok(())
        }
        Intent::Wait(ms) => {
            let elapsed = Duration::from_millis(ms);
            if realtime {
                tokio::time::sleep(elapsed).await;
            }
            session.advance(elapsed, rng);
            Ok(())
        }
        Intent::Move(location) => {
            session.set_location(location);
            session
                .refresh_nearby(Arc::clone(catalog), rng)
                .await
                .map(|()| print_nearby(session))
        }
        Intent::Refresh => session
            .refresh_nearby(Arc::clone(catalog), rng)
            .await
            .map(|()| print_nearby(session)),
        Intent::Show => {
            print_status(session);
            Ok(())
        }
    };

    if let Err(err) = result {
        warn!(target: "pokeworld.cli", ?intent, error = %err, "intent rejected");
    }
}

/// Steps through pending battle transitions, showing each intermediate state.
async fn run_delays(session: &mut Session, rng: &mut SimulationRng, realtime: bool) {
    while let Some(due) = session.next_due_ms() {
        let wait = Duration::from_millis(due.saturating_sub(session.now_ms()));
        if realtime {
            tokio::time::sleep(wait).await;
        }
        session.advance(wait, rng);
        print_battle(session);
    }
}

fn print_battle(session: &Session) {
    match session.battle() {
        Some(battle) => println!(
            "vs {} (lv {}): opponent {}/100, you {}/100 [{:?}]",
            battle.opponent().name,
            battle.opponent().level,
            battle.opponent_health(),
            battle.player_health(),
            battle.phase(),
        ),
        None => println!("Back on the map."),
    }
}

fn print_nearby(session: &Session) {
    let at = session.player().location();
    println!("Nearby {:.4}, {:.4}:", at.lat, at.lng);
    for creature in session.nearby_creatures() {
        println!(
            "  creature {:>3} #{:<3} {:<12} {:>4}m {}",
            creature.id,
            creature.catalog_id,
            creature.name,
            creature.distance_meters,
            creature.elemental_types.join("/"),
        );
    }
    for trainer in session.nearby_trainers() {
        println!(
            "  trainer  {:>3} {:<12} {:>4}m lv {} reward ${}",
            trainer.id, trainer.name, trainer.distance_meters, trainer.level, trainer.reward,
        );
    }
}

fn print_status(session: &Session) {
    let ledger = session.player().ledger();
    let stock = ledger.inventory();
    println!(
        "${} | basic {} great {} ultra {} | caught {} | screen {:?}",
        ledger.currency(),
        stock.basic,
        stock.great,
        stock.ultra,
        session.player().collected().len(),
        session.screen(),
    );
}
