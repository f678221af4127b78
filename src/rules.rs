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

use std::fmt;
use std::str::FromStr;
use super::puzzle_data::{
    PuzzleData,
    DEFAULT_MIN_WORD_LENGTH,
    DEFAULT_HINT_COST,
};

pub const DEFAULT_POINTS_PER_WORD: u32 = 1;

// What happens when the pointer moves back onto a cell that is
// already part of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoPolicy {
    // Only stepping back onto the cell before the last one removes
    // the last cell. Any other used cell is ignored.
    PreviousCell,
    // Moving onto any earlier cell cuts the selection back to it.
    AnyEarlierCell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rules {
    pub min_word_length: usize,
    pub hint_cost: u32,
    pub points_per_word: u32,
    pub undo_policy: UndoPolicy,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    ZeroMinWordLength,
    UnknownUndoPolicy(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ZeroMinWordLength => {
                write!(f, "the minimum word length must be at least 1")
            },
            Error::UnknownUndoPolicy(s) => {
                write!(f, "unknown undo policy “{}”", s)
            },
        }
    }
}

impl std::error::Error for Error {}

impl Default for Rules {
    fn default() -> Rules {
        Rules {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            hint_cost: DEFAULT_HINT_COST,
            points_per_word: DEFAULT_POINTS_PER_WORD,
            undo_policy: UndoPolicy::PreviousCell,
        }
    }
}

impl Rules {
    // Apply the settings from a puzzle file on top of these rules
    pub fn for_puzzle(self, data: &PuzzleData) -> Rules {
        Rules {
            min_word_length: data.min_word_length
                .unwrap_or(self.min_word_length),
            hint_cost: data.hint_cost.unwrap_or(self.hint_cost),
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.min_word_length < 1 {
            Err(Error::ZeroMinWordLength)
        } else {
            Ok(())
        }
    }
}

impl FromStr for UndoPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<UndoPolicy, Error> {
        match s {
            "previous" => Ok(UndoPolicy::PreviousCell),
            "any" => Ok(UndoPolicy::AnyEarlierCell),
            _ => Err(Error::UnknownUndoPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for UndoPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UndoPolicy::PreviousCell => write!(f, "previous"),
            UndoPolicy::AnyEarlierCell => write!(f, "any"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let rules = Rules::default();

        assert_eq!(rules.min_word_length, 3);
        assert_eq!(rules.hint_cost, 3);
        assert_eq!(rules.points_per_word, 1);
        assert_eq!(rules.undo_policy, UndoPolicy::PreviousCell);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn validate() {
        let rules = Rules { min_word_length: 0, ..Rules::default() };

        assert_eq!(rules.validate().unwrap_err(), Error::ZeroMinWordLength);
    }

    #[test]
    fn for_puzzle() {
        let puzzle = "theme: t\nhint-cost: 2\ngrid:\nab\nwords:\nab"
            .parse::<PuzzleData>()
            .unwrap();
        let rules = Rules::default().for_puzzle(&puzzle);

        assert_eq!(rules.min_word_length, 3);
        assert_eq!(rules.hint_cost, 2);

        let puzzle = "theme: t\nmin-length: 4\ngrid:\nab\nwords:\nab"
            .parse::<PuzzleData>()
            .unwrap();
        let rules = Rules { points_per_word: 5, ..Rules::default() }
            .for_puzzle(&puzzle);

        assert_eq!(rules.min_word_length, 4);
        assert_eq!(rules.hint_cost, 3);
        assert_eq!(rules.points_per_word, 5);
    }

    #[test]
    fn undo_policy() {
        assert_eq!("any".parse::<UndoPolicy>(), Ok(UndoPolicy::AnyEarlierCell));
        assert_eq!(
            "previous".parse::<UndoPolicy>(),
            Ok(UndoPolicy::PreviousCell),
        );
        assert_eq!(
            &"sideways".parse::<UndoPolicy>().unwrap_err().to_string(),
            "unknown undo policy “sideways”",
        );
        assert_eq!(&UndoPolicy::AnyEarlierCell.to_string(), "any");
    }
}
