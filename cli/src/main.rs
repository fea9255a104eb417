use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use pokecatch_core::*;

use board::{render, status_line};
use command::{Command, HELP};

mod board;
mod command;

#[derive(Parser, Debug)]
#[command(version, about = "Catch every pokemon without stepping on one", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Width and height of the grid
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: Coord,

    /// How many pokemon to hide
    #[arg(short, long, default_value_t = DEFAULT_MARKERS)]
    markers: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start from a saved game
    #[arg(short, long)]
    load: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let config = GameConfig::new(args.size, args.markers).context("invalid game settings")?;
    let mut session = Session::new(config, seed)?;
    if let Some(path) = &args.load {
        load(&mut session, path)?;
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    show(&mut stdout, &session)?;

    for line in stdin.lock().lines() {
        let line = line.context("could not read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{:#}", err)?;
                continue;
            }
        };
        log::trace!("command: {:?}", command);

        match run(&mut session, command) {
            Ok(Step::Continue) => show(&mut stdout, &session)?,
            Ok(Step::Print(text)) => writeln!(stdout, "{}", text)?,
            Ok(Step::Quit) => break,
            Err(err) => writeln!(stdout, "{:#}", err)?,
        }
    }

    Ok(())
}

enum Step {
    Continue,
    Print(String),
    Quit,
}

fn run(session: &mut Session, command: Command) -> Result<Step> {
    match command {
        Command::Reveal(pos) => {
            let index = session.grid().position_to_index(pos)?;
            match session.play(index)? {
                PlayOutcome::Ignored => {
                    return Ok(Step::Print("game over, try \"restart\" or \"new\"".into()));
                }
                outcome => log::debug!("reveal {:?}: {:?}", pos, outcome),
            }
        }
        Command::Flag(pos) => {
            let index = session.grid().position_to_index(pos)?;
            match session.flag(index)? {
                FlagOutcome::OutOfFlags => {
                    return Ok(Step::Print("you do not have extra pokeballs".into()));
                }
                outcome => log::debug!("flag {:?}: {:?}", pos, outcome),
            }
        }
        Command::Restart => session.restart(),
        Command::NewGame => session.new_game()?,
        Command::Save(path) => {
            std::fs::write(&path, session.save())
                .with_context(|| format!("could not save to {}", path.display()))?;
            return Ok(Step::Print(format!("saved to {}", path.display())));
        }
        Command::Load(path) => load(session, &path)?,
        Command::Help => return Ok(Step::Print(HELP.into())),
        Command::Quit => return Ok(Step::Quit),
    }
    Ok(Step::Continue)
}

fn load(session: &mut Session, path: &Path) -> Result<()> {
    let record = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    if let LoadOutcome::Fallback(err) = session.load(&record)? {
        eprintln!("{} is not a saved game ({}), started a new game", path.display(), err);
    }
    Ok(())
}

fn show(out: &mut impl Write, session: &Session) -> io::Result<()> {
    write!(out, "{}", render(session.grid()))?;
    writeln!(out, "{}", status_line(session))?;
    out.flush()
}
