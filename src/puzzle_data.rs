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

// Puzzle source files look like this:
//
// # Comment
// theme: Valentine’s vibes
// min-length: 4
// hint-cost: 3
// grid:
// HEARTS
// CHOCOL
// words:
// HEARTS 0,0 0,1 0,2 0,3 0,4 0,5
// CHOCOL*
//
// The solution after a word is optional. A ‘*’ at the end of the word
// marks it as the spangram.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use super::grid::{self, Cell, Grid};
use super::path::{self, Path};
use super::word_finder;
use log::warn;

pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;
pub const DEFAULT_HINT_COST: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryData {
    pub word: String,
    pub solution: Option<Path>,
    pub spangram: bool,
}

#[derive(Debug)]
pub struct PuzzleData {
    pub theme: String,
    pub grid: Grid,
    pub entries: Vec<EntryData>,
    pub min_word_length: Option<usize>,
    pub hint_cost: Option<u32>,
}

#[derive(Debug)]
pub enum Error {
    GridError(grid::Error),
    BadSolution { word: String, error: path::Error },
    MissingTheme,
    MissingGrid,
    NoWords,
    EmptyWord,
    MultipleSpangrams,
    DuplicateWord(String),
    ThemeWordTooShort { word: String },
    WrongSolution { word: String },
    BadCell(String),
    BadNumber(String),
    UnknownKey(String),
    UnexpectedLine(usize),
}

impl From<grid::Error> for Error {
    fn from(e: grid::Error) -> Error {
        Error::GridError(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::GridError(e) => e.fmt(f),
            Error::BadSolution { word, error } => {
                write!(f, "{}: {}", word, error)
            },
            Error::MissingTheme => write!(f, "missing theme"),
            Error::MissingGrid => write!(f, "missing grid"),
            Error::NoWords => write!(f, "no theme words"),
            Error::EmptyWord => write!(f, "empty word"),
            Error::MultipleSpangrams => write!(f, "more than one spangram"),
            Error::DuplicateWord(word) => {
                write!(f, "{} is listed more than once", word)
            },
            Error::ThemeWordTooShort { word } => {
                write!(f, "{} is shorter than the minimum word length", word)
            },
            Error::WrongSolution { word } => {
                write!(f, "the solution for {} doesn’t spell the word", word)
            },
            Error::BadCell(s) => write!(f, "invalid cell “{}”", s),
            Error::BadNumber(key) => write!(f, "invalid number for {}", key),
            Error::UnknownKey(key) => write!(f, "unknown key “{}”", key),
            Error::UnexpectedLine(line) => {
                write!(f, "line {}: unexpected text", line)
            },
        }
    }
}

impl std::error::Error for Error {}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Grid,
    Words,
}

pub fn parse_cell(s: &str) -> Result<Cell, Error> {
    let bad_cell = || Error::BadCell(s.to_string());

    let (row, col) = s.split_once(',').ok_or_else(bad_cell)?;
    let row = row.trim().parse::<u32>().map_err(|_| bad_cell())?;
    let col = col.trim().parse::<u32>().map_err(|_| bad_cell())?;

    Ok(Cell { row, col })
}

fn parse_entry(s: &str) -> Result<EntryData, Error> {
    let mut parts = s.split_whitespace();

    let Some(word) = parts.next()
    else {
        return Err(Error::EmptyWord);
    };

    let (word, spangram) = match word.strip_suffix('*') {
        Some(word) => (word, true),
        None => (word, false),
    };

    if word.is_empty() {
        return Err(Error::EmptyWord);
    }

    let word = word.to_uppercase();

    let cells = parts.map(parse_cell).collect::<Result<Vec<Cell>, Error>>()?;

    let solution = if cells.is_empty() {
        None
    } else {
        match Path::from_cells(cells) {
            Ok(path) => Some(path),
            Err(error) => return Err(Error::BadSolution { word, error }),
        }
    };

    Ok(EntryData { word, solution, spangram })
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, Error> {
    value.trim().parse::<T>().map_err(|_| Error::BadNumber(key.to_string()))
}

impl PuzzleData {
    // Checks every theme word against the grid and the minimum length
    // and fills in the solutions that weren’t given. A word that can’t
    // be found anywhere is left without a solution.
    pub fn resolve_solutions(
        &mut self,
        min_word_length: usize,
    ) -> Result<(), Error> {
        let mut seen = HashSet::new();

        for entry in self.entries.iter() {
            if !seen.insert(entry.word.as_str()) {
                return Err(Error::DuplicateWord(entry.word.clone()));
            }
        }

        for entry in self.entries.iter_mut() {
            if entry.word.chars().count() < min_word_length {
                return Err(Error::ThemeWordTooShort {
                    word: entry.word.clone(),
                });
            }

            match entry.solution.as_ref() {
                Some(path) => {
                    if !path.cells().iter().all(|&c| self.grid.contains(c)) ||
                        path.word(&self.grid) != entry.word
                    {
                        return Err(Error::WrongSolution {
                            word: entry.word.clone(),
                        });
                    }
                },
                None => {
                    entry.solution =
                        word_finder::solve(&self.grid, &entry.word);

                    if entry.solution.is_none() {
                        warn!(
                            "theme word {} can’t be found in the grid",
                            entry.word,
                        );
                    }
                },
            }
        }

        Ok(())
    }
}

impl FromStr for PuzzleData {
    type Err = Error;

    fn from_str(s: &str) -> Result<PuzzleData, Error> {
        let mut section = Section::Header;
        let mut theme = None;
        let mut grid_lines = Vec::new();
        let mut entries = Vec::<EntryData>::new();
        let mut min_word_length = None;
        let mut hint_cost = None;

        for (line_num, line) in s.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once(':')
            else {
                match section {
                    Section::Header => {
                        return Err(Error::UnexpectedLine(line_num + 1));
                    },
                    Section::Grid => grid_lines.push(line),
                    Section::Words => {
                        let entry = parse_entry(line)?;

                        if entry.spangram &&
                            entries.iter().any(|e| e.spangram)
                        {
                            return Err(Error::MultipleSpangrams);
                        }

                        if entries.iter().any(|e| e.word == entry.word) {
                            return Err(Error::DuplicateWord(entry.word));
                        }

                        entries.push(entry);
                    },
                }

                continue;
            };

            match key.trim() {
                "theme" => theme = Some(value.trim().to_string()),
                "min-length" => {
                    min_word_length = Some(parse_number(key, value)?);
                },
                "hint-cost" => hint_cost = Some(parse_number(key, value)?),
                "grid" => section = Section::Grid,
                "words" => section = Section::Words,
                key => return Err(Error::UnknownKey(key.to_string())),
            }
        }

        let Some(theme) = theme
        else {
            return Err(Error::MissingTheme);
        };

        if grid_lines.is_empty() {
            return Err(Error::MissingGrid);
        }

        if entries.is_empty() {
            return Err(Error::NoWords);
        }

        Ok(PuzzleData {
            theme,
            grid: Grid::from_rows(grid_lines)?,
            entries,
            min_word_length,
            hint_cost,
        })
    }
}

impl fmt::Display for PuzzleData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "theme: {}", self.theme)?;

        if let Some(min_word_length) = self.min_word_length {
            writeln!(f, "min-length: {}", min_word_length)?;
        }

        if let Some(hint_cost) = self.hint_cost {
            writeln!(f, "hint-cost: {}", hint_cost)?;
        }

        writeln!(f, "grid:\n{}", self.grid)?;
        writeln!(f, "words:")?;

        for entry in self.entries.iter() {
            write!(f, "{}", entry.word)?;

            if entry.spangram {
                write!(f, "*")?;
            }

            if let Some(solution) = entry.solution.as_ref() {
                write!(f, " {}", solution)?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    static VALENTINE: &'static str =
        "# A puzzle\n\
         theme: Valentine’s Vibes\n\
         hint-cost: 2\n\
         grid:\n\
         heart\n\
         chocx\n\
         words:\n\
         heart 0,0 0,1 0,2 0,3 0,4\n\
         \n\
         choc*\n";

    #[test]
    fn parse() {
        let puzzle = VALENTINE.parse::<PuzzleData>().unwrap();

        assert_eq!(&puzzle.theme, "Valentine’s Vibes");
        assert_eq!(puzzle.grid.rows(), 2);
        assert_eq!(puzzle.grid.cols(), 5);
        assert_eq!(puzzle.grid.at(Cell::new(1, 2)), 'O');
        assert_eq!(puzzle.min_word_length, None);
        assert_eq!(puzzle.hint_cost, Some(2));

        assert_eq!(puzzle.entries.len(), 2);
        assert_eq!(&puzzle.entries[0].word, "HEART");
        assert!(!puzzle.entries[0].spangram);
        assert_eq!(
            puzzle.entries[0].solution.as_ref().unwrap().cells(),
            &(0..5).map(|col| Cell::new(0, col)).collect::<Vec<_>>()[..],
        );
        assert_eq!(&puzzle.entries[1].word, "CHOC");
        assert!(puzzle.entries[1].spangram);
        assert!(puzzle.entries[1].solution.is_none());
    }

    #[test]
    fn parse_error() {
        fn error(s: &str) -> String {
            s.parse::<PuzzleData>().unwrap_err().to_string()
        }

        assert_eq!(&error("grid:\nab\nwords:\nab"), "missing theme");
        assert_eq!(&error("theme: t\nwords:\nab"), "missing grid");
        assert_eq!(&error("theme: t\ngrid:\nab\n"), "no theme words");
        assert_eq!(
            &error("theme: t\ngrid:\nab\nc\nwords:\nab"),
            "row 2 has 1 letters but the grid is 2 wide",
        );
        assert_eq!(&error("theme: t\ngrid:\nab\nwords:\n*"), "empty word");
        assert_eq!(
            &error("theme: t\ngrid:\nab\nwords:\na*\nb*"),
            "more than one spangram",
        );
        assert_eq!(
            &error("theme: t\ngrid:\ncat\nwords:\ncat\nCAT 0,0 0,1 0,2"),
            "CAT is listed more than once",
        );
        assert_eq!(
            &error("theme: t\ngrid:\nab\nwords:\nab 0,0 0;1"),
            "invalid cell “0;1”",
        );
        assert_eq!(
            &error("theme: t\ngrid:\nab\nwords:\nab 0,0 0,0"),
            "AB: cell 0,0 is used twice",
        );
        assert_eq!(
            &error("theme: t\nhint-cost: lots\ngrid:\nab\nwords:\nab"),
            "invalid number for hint-cost",
        );
        assert_eq!(&error("colour: red"), "unknown key “colour”");
        assert_eq!(&error("theme: t\nstray"), "line 2: unexpected text");
    }

    #[test]
    fn resolve_solutions() {
        let mut puzzle = VALENTINE.parse::<PuzzleData>().unwrap();

        puzzle.resolve_solutions(DEFAULT_MIN_WORD_LENGTH).unwrap();

        assert_eq!(
            puzzle.entries[1].solution.as_ref().unwrap().cells(),
            &[
                Cell::new(1, 0),
                Cell::new(1, 1),
                Cell::new(1, 2),
                Cell::new(1, 3),
            ],
        );

        let mut puzzle = "theme: t\ngrid:\ncat\nwords:\ncat\ndog"
            .parse::<PuzzleData>()
            .unwrap();

        puzzle.resolve_solutions(DEFAULT_MIN_WORD_LENGTH).unwrap();

        assert!(puzzle.entries[0].solution.is_some());
        assert!(puzzle.entries[1].solution.is_none());
    }

    #[test]
    fn resolve_solutions_error() {
        fn error(s: &str, min_word_length: usize) -> String {
            s.parse::<PuzzleData>()
                .unwrap()
                .resolve_solutions(min_word_length)
                .unwrap_err()
                .to_string()
        }

        assert_eq!(
            &error("theme: t\ngrid:\nhugs\nwords:\nhug\nhugs*", 4),
            "HUG is shorter than the minimum word length",
        );
        assert_eq!(
            &error("theme: t\ngrid:\ncat\nwords:\ncat 0,2 0,1 0,0", 3),
            "the solution for CAT doesn’t spell the word",
        );
        assert_eq!(
            &error("theme: t\ngrid:\ncat\nwords:\ncat 0,1 0,2 0,3", 3),
            "the solution for CAT doesn’t spell the word",
        );

        // Entries built by hand skip the checks in the parser
        let mut puzzle = "theme: t\ngrid:\ncat\nwords:\ncat"
            .parse::<PuzzleData>()
            .unwrap();
        puzzle.entries.push(puzzle.entries[0].clone());

        assert_eq!(
            &puzzle.resolve_solutions(3).unwrap_err().to_string(),
            "CAT is listed more than once",
        );
    }

    #[test]
    fn display() {
        let puzzle = VALENTINE.parse::<PuzzleData>().unwrap();

        assert_eq!(
            &puzzle.to_string(),
            "theme: Valentine’s Vibes\n\
             hint-cost: 2\n\
             grid:\n\
             HEART\n\
             CHOCX\n\
             words:\n\
             HEART 0,0 0,1 0,2 0,3 0,4\n\
             CHOC*\n",
        );

        let again = puzzle.to_string().parse::<PuzzleData>().unwrap();

        assert_eq!(again.entries, puzzle.entries);
        assert_eq!(&again.grid.to_string(), &puzzle.grid.to_string());
    }
}
