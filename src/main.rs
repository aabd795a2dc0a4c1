use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};

use maze_backtracker::renderer::TextRenderer;
use maze_backtracker::{Backtracker, Generator};
use rand::Rng;

const DEFAULT_TICK_MS: u64 = 50;
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Carve a perfect maze with a randomized depth-first search, one step per tick
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in cells, asked for on stdin when missing
    #[arg(long)]
    width: Option<usize>,

    /// Maze height in cells, asked for on stdin when missing
    #[arg(long)]
    height: Option<usize>,

    /// Random seed, the same seed always carves the same maze
    #[arg(long)]
    seed: Option<u64>,

    /// Delay between two generation steps, in milliseconds
    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,

    /// Skip the animation and only print the finished maze
    #[arg(long)]
    instant: bool,
}

/// Asks for a positive integer until one is given.
fn read_dimension<I: BufRead, O: Write>(
    message: &str,
    input: &mut I,
    output: &mut O,
) -> Result<usize> {
    let mut line = String::new();
    loop {
        write!(output, "{}", message)?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line).context("failed to read from stdin")? == 0 {
            bail!("stdin closed before a value was given");
        }

        match line.trim().parse::<i64>() {
            Ok(value) if value > 0 => return Ok(value as usize),
            Ok(value) => {
                warn!("rejected non-positive dimension {}", value);
                writeln!(output, "The value must be greater than 0.")?;
            }
            Err(_) => {
                warn!("rejected dimension input {:?}", line.trim());
                writeln!(output, "The value is not a valid number.")?;
            }
        }
    }
}

fn dimension_or_prompt<I: BufRead, O: Write>(
    given: Option<usize>,
    message: &str,
    input: &mut I,
    output: &mut O,
) -> Result<usize> {
    match given {
        Some(value) if value > 0 => Ok(value),
        given => {
            if given.is_some() {
                warn!("rejected non-positive dimension flag");
                writeln!(output, "The value must be greater than 0.")?;
            }
            read_dimension(message, input, output)
        }
    }
}

fn animate<R: Rng>(
    gen: &mut Backtracker<R>,
    renderer: &TextRenderer,
    tick: Duration,
) -> Result<()> {
    let stdout = io::stdout();
    loop {
        let frame = renderer.render(gen)?;
        {
            let mut out = stdout.lock();
            writeln!(out, "{}{}{}", CLEAR_SCREEN, frame, renderer.status(gen))?;
            out.flush().context("failed to draw frame")?;
        }

        if gen.is_done() {
            return Ok(());
        }
        gen.step_generation();
        thread::sleep(tick);
    }
}

fn run<R: Rng>(mut gen: Backtracker<R>, args: &Args) -> Result<()> {
    let renderer = TextRenderer::new();

    if args.instant {
        gen.generate_maze();
        print!("{}", renderer.render(&gen)?);
        println!("{}", renderer.status(&gen));
        Ok(())
    } else {
        animate(&mut gen, &renderer, Duration::from_millis(args.tick_ms))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (width, height) = {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let (mut input, mut output) = (stdin.lock(), stdout.lock());
        (
            dimension_or_prompt(args.width, "Maze width: ", &mut input, &mut output)?,
            dimension_or_prompt(args.height, "Maze height: ", &mut input, &mut output)?,
        )
    };
    info!("generating a {}x{} maze, seed {:?}", width, height, args.seed);

    match args.seed {
        Some(seed) => run(Backtracker::with_seed(width, height, seed)?, &args),
        None => run(Backtracker::from_entropy(width, height)?, &args),
    }
}
