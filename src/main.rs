//! Strictly Duel - command-line driver
//!
//! Inspects the game registry and room naming, and runs complete games
//! between two lobbies sharing an in-memory relay.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use strictly_duel::{DuelConfig, GameRegistry, Lobby, LoopbackHub, RoomName};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = DuelConfig::load_or_default(Some(cli.config.as_path()))?;

    match cli.command {
        Command::Games => list_games(&config),
        Command::RoomName { game, title } => {
            println!("{}", RoomName::tagged(game, title));
            Ok(())
        }
        Command::ParseRoom { name } => {
            let parsed = RoomName::parse(&name);
            println!("game:  {}", parsed.game_id().unwrap_or("-"));
            println!("title: {}", parsed.title());
            Ok(())
        }
        Command::Simulate { game, moves, json } => simulate(&config, &game, &moves, json),
    }
}

fn list_games(config: &DuelConfig) -> Result<()> {
    for meta in GameRegistry::from_config(config).list_games() {
        println!("{:<16} {} players", meta.id, meta.max_players);
    }
    Ok(())
}

/// Outcome of a simulated game.
#[derive(Debug, Serialize)]
struct Summary {
    game: String,
    room: String,
    moves_played: usize,
    host_result: Option<&'static str>,
    guest_result: Option<&'static str>,
    board: String,
}

/// Runs a host and a guest against one loopback relay until the game ends
/// or the scripted moves run out.
#[instrument(skip(config, moves))]
fn simulate(config: &DuelConfig, game_id: &str, moves: &[String], json: bool) -> Result<()> {
    let hub = LoopbackHub::new();
    let mut host = Lobby::new(hub.client(), config.clone().with_display_name("host"));
    let mut guest = Lobby::new(hub.client(), config.clone().with_display_name("guest"));
    host.connect()?;
    guest.connect()?;

    let room = host.create_room(game_id, "simulation")?;
    guest.join_room(&room)?;
    host.update();
    guest.update();

    let started = host.game().is_some_and(|game| game.is_started());
    if !started {
        bail!("game {} did not start after both sides joined", game_id);
    }

    let mut moves_played = 0;
    let mut script = moves.iter();
    loop {
        let finished = host.game().is_some_and(|game| game.is_finished());
        if finished {
            break;
        }
        let host_to_move = host.game().is_some_and(|game| game.is_local_turn());
        let (mover, watcher) = if host_to_move {
            (&mut host, &mut guest)
        } else {
            (&mut guest, &mut host)
        };

        let input = if moves.is_empty() {
            mover
                .game()
                .and_then(|game| game.legal_inputs().into_iter().next())
        } else {
            script.next().cloned()
        };
        let Some(input) = input else {
            break;
        };

        let game = mover.game_mut().context("mover lost its game")?;
        if let Err(error) = game.queue_input(&input) {
            warn!(%input, %error, "Skipping unparsable move");
            continue;
        }
        let filled_before = game.legal_inputs().len();
        mover.update();
        watcher.update();

        let filled_after = mover.game().map_or(0, |game| game.legal_inputs().len());
        if filled_after < filled_before {
            moves_played += 1;
            debug!(%input, host_to_move, "Move played");
        } else {
            warn!(%input, "Move rejected");
        }
    }

    let summary = Summary {
        game: game_id.to_string(),
        room,
        moves_played,
        host_result: host.game().and_then(|game| game.result_label()),
        guest_result: guest.game().and_then(|game| game.result_label()),
        board: host.game().map(|game| game.render()).unwrap_or_default(),
    };
    info!(moves_played, "Simulation complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.board);
        println!();
        println!("room:  {}", summary.room);
        println!("moves: {}", summary.moves_played);
        println!("host:  {}", summary.host_result.unwrap_or("unfinished"));
        println!("guest: {}", summary.guest_result.unwrap_or("unfinished"));
    }

    host.disconnect();
    guest.disconnect();
    Ok(())
}
