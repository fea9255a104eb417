use alloc::collections::BTreeSet;
use alloc::string::String;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Playing,
    Won,
    Lost,
}

impl SessionStatus {
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlayOutcome {
    /// Cells that changed state; the game goes on.
    Revealed(BTreeSet<CellIndex>),
    /// Cells that changed state with the reveal that finished the board.
    Won(BTreeSet<CellIndex>),
    /// A marker was hit; every marker is now displayed.
    Lost,
    /// The game is already over.
    Ignored,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    Toggled,
    /// Cell is revealed or the game is over.
    Ignored,
    /// As many flags as markers are already placed.
    OutOfFlags,
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    Loaded,
    /// The record was rejected and a fresh default game was started instead.
    Fallback(RecordError),
}

/// One player's game: a grid plus the rules a front-end applies on top of it.
///
/// Flags are limited to the number of markers, a lost game shows all markers, and a broken save falls back to a new
/// game.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    grid: Grid,
    rng: SmallRng,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = Grid::new(config, &mut rng)?;
        log::debug!("new session {:?}, seed: {}", config, seed);
        Ok(Self { config, grid, rng })
    }

    /// Continues from an existing grid, the seed only drives later new games.
    pub fn with_grid(grid: Grid, seed: u64) -> Self {
        Self {
            config: GameConfig::new_unchecked(grid.size(), grid.num_markers()),
            grid,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> SessionStatus {
        if self.grid.is_lost() {
            SessionStatus::Lost
        } else if self.grid.is_won() {
            SessionStatus::Won
        } else {
            SessionStatus::Playing
        }
    }

    /// Flags placed so far.
    pub fn attempted_catches(&self) -> CellCount {
        self.grid.flagged_count()
    }

    /// Flags still available.
    pub fn pokeballs_left(&self) -> isize {
        self.grid.remaining_flags()
    }

    pub fn play(&mut self, index: CellIndex) -> Result<PlayOutcome> {
        let index = self.grid.shape().validate_index(index)?;
        if self.status().is_final() {
            return Ok(PlayOutcome::Ignored);
        }

        Ok(match self.grid.reveal(index)? {
            RevealOutcome::MarkerHit => {
                let shown = self.grid.reveal_all_markers();
                log::info!("lost at {}, showing {} markers", index, shown.len());
                PlayOutcome::Lost
            }
            RevealOutcome::Continuing(changed) if self.grid.is_won() => {
                log::info!("won with the reveal at {}", index);
                PlayOutcome::Won(changed)
            }
            RevealOutcome::Continuing(changed) => PlayOutcome::Revealed(changed),
        })
    }

    pub fn flag(&mut self, index: CellIndex) -> Result<FlagOutcome> {
        let cell = self.grid.cell_at(index)?;
        if self.status().is_final() {
            return Ok(FlagOutcome::Ignored);
        }

        if cell.is_hidden() && self.pokeballs_left() <= 0 {
            log::debug!("no flags left for {}", index);
            return Ok(FlagOutcome::OutOfFlags);
        }

        Ok(match self.grid.toggle_flag(index)? {
            MarkOutcome::Changed => FlagOutcome::Toggled,
            MarkOutcome::NoChange => FlagOutcome::Ignored,
        })
    }

    /// Same markers, every cell hidden again.
    pub fn restart(&mut self) {
        log::debug!("restart");
        self.grid.restart();
    }

    /// New marker layout with the current marker count.
    pub fn new_game(&mut self) -> Result<()> {
        log::debug!("new game {:?}", self.config);
        self.grid.regenerate(self.config.num_markers, &mut self.rng)
    }

    pub fn save(&self) -> String {
        self.grid.to_record()
    }

    /// Replaces the game with a saved record, or with a fresh default game when the record is broken.
    pub fn load(&mut self, record: &str) -> Result<LoadOutcome> {
        match Grid::from_record(record) {
            Ok(grid) => {
                self.config = GameConfig::new_unchecked(grid.size(), grid.num_markers());
                self.grid = grid;
                log::debug!("loaded game {:?}", self.config);
                Ok(LoadOutcome::Loaded)
            }
            Err(err) => {
                log::warn!("could not load saved game, starting a new one: {}", err);
                let config = GameConfig::default();
                self.grid = Grid::new(config, &mut self.rng)?;
                self.config = config;
                Ok(LoadOutcome::Fallback(err))
            }
        }
    }
}
