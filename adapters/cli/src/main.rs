#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Arena Royale experience.

mod arena_code;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use arena_royale_core::ArenaConfig;
use clap::Parser;

use arena_code::ArenaSnapshot;

/// Top-down arena royale prototype.
#[derive(Debug, Parser)]
#[command(name = "arena-royale")]
struct Args {
    /// Master seed for generation and spawning; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of AI opponents spawned alongside the human.
    #[arg(long, default_value_t = 9)]
    ai_count: u32,

    /// World width in world units.
    #[arg(long, default_value_t = 3000.0)]
    world_width: f32,

    /// World height in world units.
    #[arg(long, default_value_t = 3000.0)]
    world_height: f32,

    /// Restore a shared arena code instead of building one from flags.
    #[arg(long, conflicts_with_all = ["seed", "ai_count", "world_width", "world_height"])]
    arena: Option<String>,

    /// Print the arena code for the selected setup and exit.
    #[arg(long)]
    share: bool,

    /// Simulate the given number of ticks without a window, then report.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,

    /// Synchronise presentation with the display refresh rate.
    #[arg(long)]
    vsync: bool,

    /// Print frame timing once per second.
    #[arg(long)]
    show_fps: bool,

    /// Path to a theme.toml overriding the built-in colors.
    #[arg(long)]
    theme: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let snapshot = match &args.arena {
        Some(code) => ArenaSnapshot::decode(code)?,
        None => ArenaSnapshot::new(
            ArenaConfig {
                world_width: args.world_width,
                world_height: args.world_height,
                ai_agent_count: args.ai_count,
                ..ArenaConfig::default()
            },
            args.seed.unwrap_or_else(rand::random),
        ),
    };

    if args.share {
        println!("{}", snapshot.encode());
        return Ok(());
    }

    if let Some(ticks) = args.headless {
        return session::run_headless(snapshot.config, snapshot.seed, ticks);
    }

    session::run_windowed(
        snapshot.config,
        snapshot.seed,
        args.vsync,
        args.show_fps,
        args.theme,
    )
}
