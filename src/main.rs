//! Headless autoplay runner (default binary).
//!
//! Loads a level, deals a board and keeps playing the first legal swap (in
//! bottom-left order) until the game is won, lost or the turn cap is hit.
//! Configuration comes from `FRUITY_*` environment variables, logging from
//! `RUST_LOG` (default `info`).

use anyhow::{bail, Result};
use log::{debug, info, warn};

use fruity_crush::config::RunConfig;
use fruity_crush::core::{Game, GameStatus, SwapOutcome};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RunConfig::from_env();
    info!("starting autoplay with {:?}", config);

    let mut game = config.load_game()?;
    run(&mut game, config.max_turns)?;

    println!(
        "{}: {} points (target {}) in {} turns, {} moves left",
        game.status().as_str(),
        game.score(),
        game.level().target_score(),
        game.turns(),
        game.moves_left()
    );
    print!("{}", game.level().dump());
    Ok(())
}

fn run(game: &mut Game, max_turns: u32) -> Result<()> {
    let dealt = game.begin();
    debug!("dealt {} fruits\n{}", dealt.len(), game.level().dump());

    while game.turns() < max_turns {
        match game.status() {
            GameStatus::Won | GameStatus::Lost => break,
            GameStatus::Stalemate => {
                warn!("no legal swap left, reshuffling");
                if game.reshuffle().is_none() {
                    break;
                }
                continue;
            }
            GameStatus::Playing => {}
        }

        let Some(swap) = game.level().legal_swaps_sorted().into_iter().next() else {
            bail!("board reports playing status without a legal swap");
        };

        match game.try_swap(&swap) {
            SwapOutcome::Resolved(report) => {
                info!(
                    "turn {}: {} -> +{} over {} cascade round(s), {} moves left",
                    game.turns(),
                    swap,
                    report.score_delta,
                    report.steps.len(),
                    report.moves_left
                );
            }
            SwapOutcome::Rejected => bail!("legal swap {} was rejected", swap),
        }
    }

    Ok(())
}
