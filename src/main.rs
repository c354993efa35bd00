//! Goldwing Demo Runner
//!
//! Headless frame driver for the simulation core: picks a variant,
//! drives it at the nominal 60 Hz with synthetic input, buys upgrades
//! when affordable, and reports progress. With `--save` the session
//! persists to a JSON store and resumes from it on the next run.
//!
//! ```text
//! goldwing-sim [variant] [seconds] [--seed N] [--save FILE] [--dump]
//! ```

use anyhow::{anyhow, Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use goldwing::{
    core::rng::GameRng,
    game::{EventData, FrameInput, Game, GameConfig},
    persist::{FileStore, MemoryStore, Store},
    UpgradeKind, Vec2, FRAME_DT, TICK_RATE, VERSION,
};

struct Options {
    variant: String,
    seconds: u64,
    seed: u64,
    save_path: Option<String>,
    dump: bool,
}

fn parse_options() -> Result<Options> {
    let mut options = Options {
        variant: "gryphon-gold".to_string(),
        seconds: 30,
        seed: 12345,
        save_path: None,
        dump: false,
    };

    let mut positionals = 0;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let value = args.next().ok_or_else(|| anyhow!("--seed needs a value"))?;
                options.seed = value.parse().context("--seed must be an integer")?;
            }
            "--save" => {
                options.save_path =
                    Some(args.next().ok_or_else(|| anyhow!("--save needs a path"))?);
            }
            "--dump" => options.dump = true,
            _ if positionals == 0 => {
                options.variant = arg.clone();
                positionals += 1;
            }
            _ if positionals == 1 => {
                options.seconds = arg.parse().context("seconds must be an integer")?;
                positionals += 1;
            }
            other => return Err(anyhow!("unexpected argument: {other}")),
        }
    }

    Ok(options)
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let options = parse_options()?;

    info!("Goldwing v{}", VERSION);
    info!("Tick Rate: {} Hz", TICK_RATE);

    let config = GameConfig::by_name(&options.variant).ok_or_else(|| {
        let names: Vec<_> = GameConfig::all_variants()
            .iter()
            .map(|v| v.name)
            .collect();
        anyhow!(
            "unknown variant '{}' (have: {})",
            options.variant,
            names.join(", ")
        )
    })?;

    match &options.save_path {
        Some(path) => {
            let store = FileStore::open(path).context("opening save file")?;
            let store = run_demo(config, store, &options)?;
            store.flush().context("flushing save file")?;
            info!("progress saved to {path}");
        }
        None => {
            run_demo(config, MemoryStore::new(), &options)?;
        }
    }

    Ok(())
}

/// Drive one session for the requested wall of frames and hand the
/// store back for flushing.
fn run_demo<S: Store>(config: GameConfig, store: S, options: &Options) -> Result<S> {
    info!("=== {} for {} s ===", config.name, options.seconds);

    let center = config.center();
    let width = config.width;
    let height = config.height;

    let mut game = Game::new(config, store, options.seed);
    let kinds: Vec<UpgradeKind> = game.config().upgrades.iter().map(|d| d.kind).collect();

    // Synthetic input: a pointer sweeping the field and a tap every
    // two-thirds of a second at a random point.
    let mut input_rng = GameRng::new(options.seed ^ 0x90cc_a75e);

    let total_frames = options.seconds * TICK_RATE as u64;
    let mut kills = 0u64;
    let mut last_report = 0u64;

    for frame in 0..total_frames {
        let sweep = frame as f64 * 0.02;
        let pointer = center + Vec2::new(sweep.cos() * width * 0.3, sweep.sin() * height * 0.3);
        let tap = if frame % 40 == 0 {
            Some(input_rng.position_in(width, height))
        } else {
            None
        };
        let input = FrameInput {
            pointer: Some(pointer),
            tap,
            primary: false,
        };

        let events = game.simulate(&input, FRAME_DT);
        for event in &events {
            match &event.data {
                EventData::HostileSlain { gold, crit, .. } => {
                    kills += 1;
                    if *crit {
                        info!(gold, "critical kill");
                    }
                }
                EventData::LevelUp { level } => {
                    info!(level, "level up");
                }
                EventData::BonusActivated { kind, duration } => {
                    info!(?kind, duration, "bonus rolled");
                }
                _ => {}
            }
        }

        // Shop pass every five seconds: buy the first affordable upgrade.
        if frame % (5 * TICK_RATE as u64) == (5 * TICK_RATE as u64) - 1 {
            for kind in &kinds {
                if game.purchase(*kind) {
                    break;
                }
            }
        }

        if frame - last_report >= 10 * TICK_RATE as u64 {
            info!(
                frame,
                gold = %goldwing::render::format_amount(game.state.gold),
                level = game.state.level,
                pieces = game.state.collectibles.len(),
                hostiles = game.state.hostiles.len(),
                kills,
                "progress"
            );
            last_report = frame;
        }
    }

    info!("=== Results: {} ===", game.config().name);
    info!(
        gold = %goldwing::render::format_amount(game.state.gold),
        experience = game.state.experience,
        level = game.state.level,
        kills,
        "final tally"
    );
    for (kind, upgrade) in game.state.upgrades.iter() {
        info!(upgrade = %kind, level = upgrade.level, "owned");
    }

    if options.dump {
        let json = serde_json::to_string_pretty(&game.state).context("serializing state")?;
        println!("{json}");
    }

    Ok(game.into_store())
}
