//! Terminal Tetris runner (default binary).
//!
//! Every key press is applied and followed by one tick; with no input the
//! game still ticks every `TICK_MS`. Logging goes to stderr and is off
//! unless `RUST_LOG` is set; redirect it (`2>game.log`) when enabled.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use bit_tetris::cli::{parse_args, RunConfig};
use bit_tetris::core::{Game, SimpleRng};
use bit_tetris::input::{handle_key_event, should_quit};
use bit_tetris::term::{GameView, TerminalRenderer};
use bit_tetris::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, config: RunConfig) -> Result<()> {
    let seed = config.seed.unwrap_or_else(clock_seed);
    info!("seed {} config {:?}", seed, config.game);
    let mut game = Game::with_source(SimpleRng::new(seed), config.game);

    let view = GameView::default();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        term.draw(&view.render(&game))?;

        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if should_quit(key) {
                    return Ok(());
                }
                match handle_key_event(key) {
                    Some(GameAction::Restart) => {
                        game.restart();
                    }
                    Some(action) => {
                        game.apply_action(action);
                        if action != GameAction::Tick {
                            game.tick();
                        }
                    }
                    None => {
                        game.tick();
                    }
                }
                last_tick = Instant::now();
                continue;
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick();
        }
    }
}
