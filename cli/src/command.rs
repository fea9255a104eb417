use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use pokecatch_core::{Coord, Position};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Reveal(Position),
    Flag(Position),
    Restart,
    NewGame,
    Save(PathBuf),
    Load(PathBuf),
    Help,
    Quit,
}

pub(crate) const HELP: &str = "\
commands:
  r <col> <row>   reveal a cell
  f <col> <row>   place or remove a flag
  restart         same markers, all cells hidden
  new             new marker layout
  save <path>     save the game
  load <path>     load a saved game
  help            show this text
  quit            leave";

impl Command {
    pub(crate) fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or_else(|| anyhow!("empty command"))?;

        let command = match name {
            "r" | "reveal" => Self::Reveal(parse_position(&mut words)?),
            "f" | "flag" => Self::Flag(parse_position(&mut words)?),
            "restart" => Self::Restart,
            "n" | "new" => Self::NewGame,
            "save" => Self::Save(parse_path(&mut words)?),
            "load" => Self::Load(parse_path(&mut words)?),
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => bail!("unknown command {:?}, try \"help\"", other),
        };

        if let Some(extra) = words.next() {
            bail!("unexpected argument {:?}", extra);
        }
        Ok(command)
    }
}

fn parse_position<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Position> {
    let mut coord = |axis: &str| -> Result<Coord> {
        let word = words.next().with_context(|| format!("missing {}", axis))?;
        word.parse()
            .with_context(|| format!("{} {:?} is not a number", axis, word))
    };
    let col = coord("column")?;
    let row = coord("row")?;
    Ok((col, row))
}

fn parse_path<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<PathBuf> {
    words.next().map(PathBuf::from).context("missing file path")
}
