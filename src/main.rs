use std::env;

use anyhow::{Context, Result};
use tracing::info;

use lgo_cli::{SolverConfig, SolverEngine};
use lgo_core::Move;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = parse_args(env::args().skip(1).collect())?;
    info!(size = config.size, alpha = config.alpha, beta = config.beta, "lgo solver starting");

    SolverEngine::new(config).run().map_err(anyhow::Error::from)
}

/// `lgo <size> [--guess G | --alpha A --beta B] [move...]`
///
/// `--guess` overrides `--alpha`/`--beta` to `[g-1, g+1]`; the trailing
/// tokens are the startup move prefix applied before the REPL starts
/// accepting `r`/`h`/`i` commands.
fn parse_args(args: Vec<String>) -> Result<SolverConfig> {
    let mut args = args.into_iter();
    let size: u8 = args
        .next()
        .context("usage: lgo <size> [--guess G | --alpha A --beta B] [move...]")?
        .parse()
        .context("size must be a positive integer")?;

    let mut guess: Option<i32> = None;
    let mut alpha: Option<i32> = None;
    let mut beta: Option<i32> = None;
    let mut moves = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--guess" => {
                guess = Some(
                    args.next()
                        .context("--guess requires a value")?
                        .parse()
                        .context("--guess value must be an integer")?,
                );
            }
            "--alpha" => {
                alpha = Some(
                    args.next()
                        .context("--alpha requires a value")?
                        .parse()
                        .context("--alpha value must be an integer")?,
                );
            }
            "--beta" => {
                beta = Some(
                    args.next()
                        .context("--beta requires a value")?
                        .parse()
                        .context("--beta value must be an integer")?,
                );
            }
            token => {
                let mv: Move = token
                    .parse()
                    .with_context(|| format!("invalid move {token:?} in startup prefix"))?;
                moves.push(mv);
            }
        }
    }

    let config = if let Some(g) = guess {
        SolverConfig::from_guess(size, g)?
    } else {
        let default_alpha = -(size as i32 + 1);
        let default_beta = size as i32 + 1;
        SolverConfig::new(size, alpha.unwrap_or(default_alpha), beta.unwrap_or(default_beta))?
    };
    Ok(config.with_moves(moves))
}
