//! Hexfront - Entry Point
//!
//! Console driver for the rules engine: loads a board and optional scenario,
//! then runs a command loop against the battle session.

use hexfront::core::error::Result;
use hexfront::{AgentType, Command, GameStatus, PlayerId, Session};

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "hexfront", about = "Hex-board tactical card battle")]
struct Args {
    /// Map file describing the board
    #[arg(long, default_value = "data/demo.map")]
    board: PathBuf,

    /// Optional scenario file with starting placements
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// RNG seed; the same seed replays the same battle
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value = "Player A")]
    name_a: String,

    #[arg(long, default_value = "Player B")]
    name_b: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hexfront=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut session = Session::new(args.seed);
    session.start_battle(
        &args.name_a,
        &args.name_b,
        &args.board,
        args.scenario.as_deref(),
    )?;

    println!("\n=== HEXFRONT ===");
    println!("Commands:");
    println!("  move <cell>     - Move the active agent");
    println!("  attack <cell>   - Attack an enemy agent on a cell");
    println!("  mark            - Scout marks its cell");
    println!("  control         - Sergeant claims its cell");
    println!("  release         - Sergeant releases an enemy-controlled cell");
    println!("  switch          - Swap the active card for another agent");
    println!("  end             - End the turn");
    println!("  status / s      - Show the battle status");
    println!("  quit / q        - Exit");
    println!();

    loop {
        display_status(&session);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }
        if input == "status" || input == "s" {
            display_detailed_status(&session);
            continue;
        }

        let Some(command) = Command::parse(input) else {
            println!("Unrecognized command: {input}");
            continue;
        };

        let result = session.execute(&command);
        println!("{}", result.message);

        if session.status() != GameStatus::InProgress {
            println!("Battle over.");
            break;
        }
    }

    Ok(())
}

fn display_status(session: &Session) {
    let state = session.state();
    let active = session
        .active_card_kind()
        .map(|kind| kind.to_string())
        .unwrap_or_else(|| "none".into());
    println!(
        "[turn {} | {} to act | active card: {} | action used: {}]",
        state.turn.turn_index,
        state.current_player().name,
        active,
        session.action_used()
    );
}

fn display_detailed_status(session: &Session) {
    let state = session.state();
    for player in [PlayerId::A, PlayerId::B] {
        let side = state.player(player);
        println!(
            "{} ({}) - cards: {}, controlled cells: {}",
            side.name,
            player,
            side.deck.len(),
            session.controlled_cells(player)
        );
        for kind in AgentType::ALL {
            let agent = side.agent(kind);
            let place = agent.cell.as_deref().unwrap_or("-");
            let life = if agent.alive { "alive" } else { "down" };
            println!("  {kind:<8} hp {} {} at {place}", agent.hp, life);
        }
    }
}
