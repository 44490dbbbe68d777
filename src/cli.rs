//! Command-line options of the terminal runner.

use anyhow::{anyhow, Result};

use crate::core::{GameConfig, MovePolicy, RotationScope};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Fixed seed; `None` seeds from the clock
    pub seed: Option<u32>,
    pub game: GameConfig,
}

/// Parse runner arguments (program name already stripped).
///
/// Accepted: `--seed <u32>`, `--shared-rotation`, `--reject-blocked`.
pub fn parse_args(args: &[String]) -> Result<RunConfig> {
    let mut seed = None;
    let mut game = GameConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                let parsed = v
                    .parse::<u32>()
                    .map_err(|e| anyhow!("invalid --seed {:?}: {}", v, e))?;
                seed = Some(parsed);
            }
            "--shared-rotation" => {
                game = game.with_rotation_scope(RotationScope::SharedTable);
            }
            "--reject-blocked" => {
                game = game.with_move_policy(MovePolicy::Reject);
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(RunConfig { seed, game })
}
