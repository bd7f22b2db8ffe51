//! Terminal player for a single NPC interaction
//!
//! Enter confirms a message, digits pick a choice, walks are simulated with
//! fixed frame ticks, `q` abandons the interaction.

use crate::{
    config::EngineConfig,
    host::{FlagStore, Presenter, WalkableActor},
    runtime::debug::DebugConfig,
    session::{Director, SessionToken},
    storage::{JsonFlagStore, JsonProgressRepository, MemoryFlagStore, Progress, ProgressRepository},
    town::{TownData, World},
    types::{Status, Suspension},
    ui::{Screen, ScreenEntry},
};
use anyhow::{Context, anyhow, bail};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Length of one simulated frame in milliseconds
const FRAME_MS: f32 = 16.0;
/// Frames a walk may take before the player gives up on it
const MAX_WALK_FRAMES: usize = 10_000;

/// What to play
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub town: PathBuf,
    pub npc: String,
    pub config: Option<PathBuf>,
    pub flags: Option<PathBuf>,
    pub save_dir: Option<PathBuf>,
    pub debug: bool,
}

/// Run the player mode
pub fn run_play(options: &PlayOptions) -> anyhow::Result<()> {
    let mut config = match &options.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if options.debug {
        config.debug = DebugConfig::verbose();
    }

    let town = TownData::load(&options.town)?;
    let entries = town
        .talking(&options.npc)
        .ok_or_else(|| anyhow!("No NPC named '{}' in {}", options.npc, options.town.display()))?
        .to_vec();

    let flags: Box<dyn FlagStore> = match &options.flags {
        Some(path) => Box::new(JsonFlagStore::open(path)?),
        None => Box::new(MemoryFlagStore::new()),
    };
    let mut world = town.build_world(flags, &config);
    let mut director = Director::new(config.clone());
    let player = world.player.clone();

    println!("=== Budgetville ===");
    println!();
    println!("Controls:");
    println!("  Enter: next");
    println!("  1-9:   select choice");
    println!("  q:     quit");
    println!();

    let (token, mut status) = director.begin(&options.npc, &player, &entries, &mut world.host())?;
    render(&mut world.screen)?;

    loop {
        if options.debug {
            display_debug_info(&director, &status);
        }

        status = match status {
            Status::Finished | Status::Idle => break,
            Status::Paused(Suspension::AwaitingConfirm) => {
                let input = get_input("")?;
                if input == "q" {
                    director.abandon(token, &mut world.host())?;
                    println!("Goodbye!");
                    break;
                }
                director.confirm(token, &mut world.host())?
            }
            Status::Paused(Suspension::AwaitingChoice) => {
                let input = get_input("Select (1-9):")?;
                if input == "q" {
                    director.abandon(token, &mut world.host())?;
                    println!("Goodbye!");
                    break;
                }
                match input.parse::<usize>() {
                    Ok(choice) if (1..=9).contains(&choice) => {
                        director.choose(token, choice - 1, &mut world.host())?
                    }
                    _ => {
                        println!("Invalid choice. Enter 1-9.");
                        status
                    }
                }
            }
            Status::Paused(Suspension::AwaitingWalk { actor }) => {
                println!("({actor} is walking...)");
                simulate_walk(&mut director, token, &mut world, &actor)?
            }
        };
        render(&mut world.screen)?;
    }

    println!();
    println!("== END ==");
    if let Some(balance) = world.screen.balance_label() {
        println!("Balance: {balance}");
    }

    if let Some(dir) = &options.save_dir {
        save_progress(dir, &config, &world)?;
    }
    Ok(())
}

/// Tick the world until the walk the interpreter waits on comes back
fn simulate_walk(
    director: &mut Director,
    token: SessionToken,
    world: &mut World,
    actor: &str,
) -> anyhow::Result<Status> {
    for _ in 0..MAX_WALK_FRAMES {
        let mut status = None;
        for completion in world.tick(FRAME_MS) {
            status = Some(director.walk_finished(token, completion, &mut world.host())?);
        }
        match status {
            Some(Status::Paused(Suspension::AwaitingWalk { .. })) | None => {}
            Some(status) => return Ok(status),
        }
        if !world.cast.is_anyone_walking() {
            break;
        }
    }
    bail!("{actor} never finished walking")
}

fn save_progress(dir: &Path, config: &EngineConfig, world: &World) -> anyhow::Result<()> {
    let player = world
        .cast
        .get(&world.player)
        .ok_or_else(|| anyhow!("Player '{}' missing from cast", world.player))?;
    let progress = Progress {
        current_map: world.map.clone(),
        player_pos: player.position(),
        player_direction: player.direction(),
        save_key: config.save_key.clone(),
    };

    let repository = JsonProgressRepository::new(dir);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(repository.save(&progress))?;
    println!("Saved progress to slot {}", progress.save_key);
    Ok(())
}

/// Print everything that appeared since the last frame
fn render(screen: &mut Screen) -> io::Result<()> {
    for entry in screen.drain_transcript() {
        match entry {
            ScreenEntry::Text(text) => type_out(screen, &text)?,
            ScreenEntry::Choices(labels) => {
                println!("--- Choice ---");
                for (i, label) in labels.iter().enumerate() {
                    println!("{}. {}", i + 1, label);
                }
                println!();
            }
            ScreenEntry::Balance(label) => {
                println!("[Balance: {label}]");
            }
        }
    }
    Ok(())
}

/// Typewriter print of the text box contents
fn type_out(screen: &mut Screen, text: &str) -> io::Result<()> {
    if screen.current_text() != Some(text) {
        println!("{text}");
        return Ok(());
    }

    let mut printed = 0;
    loop {
        let visible = screen.textbox().visible_text();
        let fresh: String = visible.chars().skip(printed).collect();
        printed += fresh.chars().count();
        print!("{fresh}");
        io::stdout().flush()?;

        if !screen.is_typing() {
            break;
        }
        screen.tick();
        std::thread::sleep(Duration::from_millis(FRAME_MS as u64));
    }
    println!();
    Ok(())
}

fn display_debug_info(director: &Director, status: &Status) {
    println!("[debug]");
    if let Some(interpreter) = director.interpreter() {
        let next = interpreter
            .script()
            .get(interpreter.current_index())
            .map_or("end", |event| event.kind());
        println!(
            "index={} max={} next={} status={:?}",
            interpreter.current_index(),
            interpreter.max_index(),
            next,
            status
        );
        if !interpreter.ephemeral_flags().is_empty() {
            println!("choice flags={:?}", interpreter.ephemeral_flags());
        }
    }
    println!();
}

/// Get user input with an optional prompt
fn get_input(prompt: &str) -> io::Result<String> {
    if !prompt.is_empty() {
        print!("{} ", prompt);
        io::stdout().flush()?;
    }

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
