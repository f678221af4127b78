// Strands – A word game
// Copyright (C) 2024  Neil Roberts
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

use super::grid::{Cell, Grid};
use super::path::Path;
use super::rules::{self, Rules};
use super::session::Session;
use super::oracle::{OracleError, WordOracle};
use super::puzzle_data::{self, PuzzleData};
use std::collections::HashSet;
use std::fmt::{self, Write};
use log::{debug, warn};

macro_rules! show_word_message {
    ( $puzzle:expr, $format:literal, $( $x:expr ),* ) => {
        {
            $puzzle.pending_word_message.clear();
            write!(
                &mut $puzzle.pending_word_message,
                $format,
                $( $x, )*
            ).unwrap();
            $puzzle.has_pending_word_message = true;
        }
    }
}

pub struct ThemeEntry {
    word: String,
    solution: Option<Path>,
    spangram: bool,
}

impl ThemeEntry {
    pub fn word(&self) -> &str {
        &self.word
    }

    // None if the word can’t be found anywhere in the grid
    pub fn solution(&self) -> Option<&Path> {
        self.solution.as_ref()
    }

    pub fn is_spangram(&self) -> bool {
        self.spangram
    }
}

// Everything about the game that changes as the player finds words
#[derive(Debug, Default)]
pub struct GameState {
    // In the order they were found
    found_entries: Vec<usize>,
    found_words: HashSet<String>,
    points: u32,
    hinted_entry: Option<usize>,
}

impl GameState {
    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn found_entries(&self) -> &[usize] {
        &self.found_entries
    }

    pub fn is_entry_found(&self, entry_num: usize) -> bool {
        self.found_entries.contains(&entry_num)
    }

    pub fn is_word_found(&self, word: &str) -> bool {
        self.found_words.contains(word)
    }

    #[cfg(test)]
    pub fn n_found_words(&self) -> usize {
        self.found_words.len()
    }

    pub fn hinted_entry(&self) -> Option<usize> {
        self.hinted_entry
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    // Nothing was selected
    Ignored,
    TooShort,
    ThemeWord { entry: usize, spangram: bool },
    AlreadyFound,
    // The word needs to be checked with the oracle before it can be
    // scored. The result should be passed to oracle_verdict.
    Pending(String),
    Accepted { points: u32 },
    NotRecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintError {
    InsufficientPoints,
    NothingToHint,
    NoSolutionForHint,
}

impl fmt::Display for HintError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HintError::InsufficientPoints => write!(f, "not enough points"),
            HintError::NothingToHint => write!(f, "no theme words left"),
            HintError::NoSolutionForHint => {
                write!(f, "none of the remaining theme words are in the grid")
            },
        }
    }
}

impl std::error::Error for HintError {}

#[derive(Debug)]
pub enum Error {
    Rules(rules::Error),
    Content(puzzle_data::Error),
}

impl From<rules::Error> for Error {
    fn from(e: rules::Error) -> Error {
        Error::Rules(e)
    }
}

impl From<puzzle_data::Error> for Error {
    fn from(e: puzzle_data::Error) -> Error {
        Error::Content(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Rules(e) => e.fmt(f),
            Error::Content(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {}

// The cells the renderer needs to highlight for one frame
pub struct Frame {
    pub selected: HashSet<Cell>,
    pub found: HashSet<Cell>,
    pub hinted: HashSet<Cell>,
    pub spangram: HashSet<Cell>,
}

pub struct Puzzle {
    theme: String,
    grid: Grid,
    entries: Vec<ThemeEntry>,
    rules: Rules,
    state: GameState,

    has_pending_word_message: bool,
    pending_word_message: String,

    pending_spangram: bool,
    pending_finish: bool,

    points_dirty: bool,
    n_found_entries_dirty: bool,
    cells_dirty: bool,
}

impl Puzzle {
    pub fn new(mut data: PuzzleData, rules: Rules) -> Result<Puzzle, Error> {
        rules.validate()?;
        data.resolve_solutions(rules.min_word_length)?;

        let PuzzleData { theme, grid, entries, .. } = data;

        let entries = entries.into_iter().map(|entry| ThemeEntry {
            word: entry.word,
            solution: entry.solution,
            spangram: entry.spangram,
        }).collect::<Vec<_>>();

        Ok(Puzzle {
            theme,
            grid,
            entries,
            rules,
            state: GameState::default(),

            has_pending_word_message: false,
            pending_word_message: String::new(),

            pending_spangram: false,
            pending_finish: false,

            points_dirty: true,
            n_found_entries_dirty: true,
            cells_dirty: true,
        })
    }

    fn show_word_message(&mut self, message: &str) {
        self.pending_word_message.clear();
        self.pending_word_message.push_str(message);
        self.has_pending_word_message = true;
    }

    fn find_unfound_entry(&self, path: &Path) -> Option<usize> {
        self.entries.iter().enumerate().position(|(entry_num, entry)| {
            !self.state.is_entry_found(entry_num) &&
                entry.solution.as_ref() == Some(path)
        })
    }

    fn score_theme_entry(&mut self, entry_num: usize) -> Outcome {
        let entry = &self.entries[entry_num];
        let spangram = entry.spangram;

        self.state.found_entries.push(entry_num);
        self.state.found_words.insert(entry.word.clone());

        if self.state.hinted_entry == Some(entry_num) {
            self.state.hinted_entry = None;
        }

        self.n_found_entries_dirty = true;
        self.cells_dirty = true;

        if spangram {
            self.pending_spangram = true;
            self.show_word_message("Spangram!");
        } else {
            self.show_word_message("Theme word!");
        }

        if self.state.found_entries.len() >= self.entries.len() {
            self.pending_finish = true;
        }

        debug!("found theme word {}", self.entries[entry_num].word);

        Outcome::ThemeWord { entry: entry_num, spangram }
    }

    // Score a path that the player has finished selecting. If the path
    // isn’t one of the theme words and hasn’t been found before, the
    // word it spells is returned as Outcome::Pending so that the
    // caller can ask the oracle about it.
    pub fn resolve(&mut self, path: &Path) -> Outcome {
        if path.is_empty() {
            return Outcome::Ignored;
        }

        if path.len() < self.rules.min_word_length {
            self.show_word_message("Too short");
            return Outcome::TooShort;
        }

        if let Some(entry_num) = self.find_unfound_entry(path) {
            return self.score_theme_entry(entry_num);
        }

        let word = path.word(&self.grid);

        if self.state.is_word_found(&word) {
            self.show_word_message("Already found");
            Outcome::AlreadyFound
        } else {
            debug!("asking the oracle about {}", word);
            Outcome::Pending(word)
        }
    }

    // Apply the answer from the oracle for a word that resolve
    // returned as pending. Only the game state is touched so it
    // doesn’t matter if a new selection has started in the meantime.
    pub fn oracle_verdict(
        &mut self,
        word: &str,
        verdict: Result<bool, OracleError>,
    ) -> Outcome {
        let valid = match verdict {
            Ok(valid) => valid,
            Err(e) => {
                warn!("checking {} failed: {}", word, e);
                false
            },
        };

        if self.state.is_word_found(word) {
            self.show_word_message("Already found");
            Outcome::AlreadyFound
        } else if valid {
            let points = self.rules.points_per_word;

            self.state.points += points;
            self.state.found_words.insert(word.to_string());
            self.points_dirty = true;

            if points == 1 {
                self.show_word_message("+1 point!");
            } else {
                show_word_message!(self, "+{} points!", points);
            }

            Outcome::Accepted { points }
        } else {
            self.show_word_message("Not a word");
            Outcome::NotRecognized
        }
    }

    pub fn resolve_with<O>(&mut self, path: &Path, oracle: &mut O) -> Outcome
        where O: WordOracle + ?Sized
    {
        match self.resolve(path) {
            Outcome::Pending(word) => {
                let verdict = oracle.is_word(&word);
                self.oracle_verdict(&word, verdict)
            },
            outcome => outcome,
        }
    }

    // Spend points to reveal the path of the first theme word that
    // hasn’t been found yet.
    pub fn use_hint(&mut self) -> Result<usize, HintError> {
        if let Some(entry_num) = self.state.hinted_entry {
            return Ok(entry_num);
        }

        if self.state.points < self.rules.hint_cost {
            return Err(HintError::InsufficientPoints);
        }

        let mut unsolvable = false;

        for (entry_num, entry) in self.entries.iter().enumerate() {
            if self.state.is_entry_found(entry_num) {
                continue;
            }

            if entry.solution.is_none() {
                warn!(
                    "no hint available for {}: it isn’t in the grid",
                    entry.word,
                );
                unsolvable = true;
                continue;
            }

            self.state.points -= self.rules.hint_cost;
            self.state.hinted_entry = Some(entry_num);
            self.points_dirty = true;
            self.cells_dirty = true;

            debug!("hinting {}", entry.word);

            return Ok(entry_num);
        }

        if unsolvable {
            self.show_word_message("No hint available");
            Err(HintError::NoSolutionForHint)
        } else {
            Err(HintError::NothingToHint)
        }
    }

    pub fn can_use_hint(&self) -> bool {
        self.state.hinted_entry.is_none() &&
            self.state.points >= self.rules.hint_cost &&
            !self.is_finished()
    }

    // How far the hint button is charged, from 0 to the hint cost
    pub fn hint_charge(&self) -> u32 {
        self.state.points.min(self.rules.hint_cost)
    }

    pub fn frame(&self, session: &Session) -> Frame {
        let mut found = HashSet::new();
        let mut spangram = HashSet::new();

        for &entry_num in self.state.found_entries.iter() {
            let entry = &self.entries[entry_num];

            if let Some(path) = entry.solution.as_ref() {
                found.extend(path.cells().iter().copied());

                if entry.spangram {
                    spangram.extend(path.cells().iter().copied());
                }
            }
        }

        let hinted: HashSet<Cell> = self.state.hinted_entry
            .and_then(|entry_num| self.entries[entry_num].solution.as_ref())
            .map(|path| path.cells().iter().copied().collect())
            .unwrap_or_default();

        Frame {
            selected: session.path().cells().iter().copied().collect(),
            found,
            hinted,
            spangram,
        }
    }

    pub fn pending_word_message(&mut self) -> Option<&str> {
        if self.has_pending_word_message {
            self.has_pending_word_message = false;
            Some(&self.pending_word_message)
        } else {
            None
        }
    }

    pub fn pending_spangram(&mut self) -> bool {
        std::mem::replace(&mut self.pending_spangram, false)
    }

    pub fn pending_finish(&mut self) -> bool {
        std::mem::replace(&mut self.pending_finish, false)
    }

    pub fn changed_points(&mut self) -> Option<u32> {
        if self.points_dirty {
            self.points_dirty = false;
            Some(self.state.points)
        } else {
            None
        }
    }

    pub fn changed_n_found_entries(&mut self) -> Option<usize> {
        if self.n_found_entries_dirty {
            self.n_found_entries_dirty = false;
            Some(self.state.found_entries.len())
        } else {
            None
        }
    }

    pub fn changed_cells(&mut self) -> bool {
        std::mem::replace(&mut self.cells_dirty, false)
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn entries(&self) -> &[ThemeEntry] {
        &self.entries
    }

    pub fn total_n_entries(&self) -> usize {
        self.entries.len()
    }

    pub fn is_finished(&self) -> bool {
        self.state.found_entries.len() >= self.entries.len()
    }
}
