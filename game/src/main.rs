//! Headless match runner: loads a map, spawns bots and plays until one is left.
//!
//! Usage:
//!   stardew-bombers --map farm --players 4 --seed 7
//!   stardew-bombers --tiled arena.json --palette cave

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use stardew_bombers::direction::Dir4;
use stardew_bombers::grid::{GameMap, TilePalette};
use stardew_bombers::{GameConfig, GameEvent, GameManager, PlayerId, maps};

#[derive(Clone, Copy, ValueEnum)]
enum Palette {
    Farm,
    Cave,
    Home,
}

impl From<Palette> for TilePalette {
    fn from(p: Palette) -> Self {
        match p {
            Palette::Farm => TilePalette::Farm,
            Palette::Cave => TilePalette::Cave,
            Palette::Home => TilePalette::Home,
        }
    }
}

#[derive(Parser)]
#[command(name = "stardew-bombers")]
#[command(about = "Run a headless bomb-arena match between scripted players")]
struct Args {
    /// Embedded map to play on
    #[arg(long, default_value = "farm")]
    map: String,

    /// Import a Tiled JSON export instead of an embedded map
    #[arg(long)]
    tiled: Option<PathBuf>,

    /// Tile-id palette for --tiled
    #[arg(long, value_enum, default_value = "farm")]
    palette: Palette,

    /// Number of players
    #[arg(long, default_value_t = 4)]
    players: usize,

    /// Give up after this many ticks
    #[arg(long, default_value_t = 20_000)]
    max_ticks: u64,

    /// Seed for item drops, spawns and bot decisions
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding the default tuning
    #[arg(long)]
    config: Option<PathBuf>,

    /// List embedded maps and exit
    #[arg(long)]
    list_maps: bool,
}

/// A player that wanders, drops bombs now and then and backs off afterwards.
struct Bot {
    id: PlayerId,
    heading: Dir4,
}

impl Bot {
    fn act(&mut self, game: &mut GameManager, rng: &mut StdRng, now: u64) {
        if rng.random_bool(0.02) && game.place_bomb(&self.id, now) {
            self.heading = self.heading.opposite();
            game.move_player(&self.id, self.heading);
            return;
        }
        if rng.random_bool(0.2)
            && let Some(&dir) = Dir4::all().choose(rng)
        {
            self.heading = dir;
        }
        if !game.move_player(&self.id, self.heading) && rng.random_bool(0.5) {
            self.heading = self.heading.opposite();
        }
    }
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            GameConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    Ok(config)
}

fn load_map(args: &Args) -> Result<GameMap> {
    match &args.tiled {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading map {}", path.display()))?;
            Ok(GameMap::from_tiled_json(&text, args.palette.into())?)
        }
        None => Ok(maps::get_map(&args.map)?),
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::BombExploded(explosion) => log::debug!(
            "{}'s bomb at {:?} hit {} cells",
            explosion.owner,
            explosion.center,
            explosion.cells.len()
        ),
        GameEvent::BlockDestroyed { cell, kind } => {
            log::debug!("{} destroyed at {cell:?}", kind.name())
        }
        GameEvent::ItemSpawned(item) => log::debug!("{} dropped", item.kind()),
        GameEvent::ItemCollected { player, item } => {
            log::info!("{player} picked up {}", item.kind())
        }
        GameEvent::PlayerDamaged { player, health } => {
            log::info!("{player} was hit, {health} health left")
        }
        GameEvent::PlayerDied { player } => log::info!("{player} is out"),
        GameEvent::GameOver { .. } => {}
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list_maps {
        for name in maps::names() {
            println!("{name}");
        }
        return Ok(());
    }
    if args.players < 2 {
        bail!("need at least two players, got {}", args.players);
    }

    let config = load_config(&args)?;
    let map = load_map(&args)?;
    log::info!(
        "Playing {:?} ({}x{}) with {} players",
        map.name(),
        map.width(),
        map.height(),
        args.players
    );

    let tick_ms = ((config.tick_delta * 1000.0).round() as u64).max(1);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(2)),
        None => StdRng::from_os_rng(),
    };
    let mut game = GameManager::new(map, config);

    let mut bots = Vec::new();
    for i in 1..=args.players {
        let id = PlayerId::new(format!("p{i}"));
        let Some(spawn) = game.spawn_player(id.clone()) else {
            bail!("map has no room for player {id}");
        };
        log::info!("{id} spawns at ({}, {})", spawn.x, spawn.y);
        bots.push(Bot {
            id,
            heading: Dir4::South,
        });
    }

    game.on_game_end(|winner| match winner {
        Some(id) => log::info!("Winner: {id}"),
        None => log::info!("Nobody survived"),
    });

    let mut now = 0;
    let mut pickups: HashMap<PlayerId, u32> = HashMap::new();
    for _ in 0..args.max_ticks {
        now += tick_ms;
        for bot in &mut bots {
            if game.player(&bot.id).is_some_and(|p| p.is_alive()) {
                bot.act(&mut game, &mut rng, now);
            }
        }
        for event in game.update(now) {
            if let GameEvent::ItemCollected { player, .. } = &event {
                *pickups.entry(player.clone()).or_default() += 1;
            }
            log_event(&event);
        }
        if game.is_game_over() {
            break;
        }
    }

    if !game.is_game_over() {
        log::info!("No winner after {} ticks", args.max_ticks);
    }
    for player in game.players() {
        log::info!(
            "{}: {:?}, {} health, {} pickups",
            player.id(),
            player.status(),
            player.health(),
            pickups.get(player.id()).copied().unwrap_or(0)
        );
    }
    Ok(())
}
