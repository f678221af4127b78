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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    pub fn new(row: u32, col: u32) -> Cell {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

// Two cells touch if they are within one step of each other in both
// directions, including diagonally. A cell never touches itself.
pub fn is_adjacent(a: Cell, b: Cell) -> bool {
    !same_cell(a, b) &&
        a.row.abs_diff(b.row) <= 1 &&
        a.col.abs_diff(b.col) <= 1
}

pub fn same_cell(a: Cell, b: Cell) -> bool {
    a == b
}

#[derive(Debug)]
pub struct Grid {
    values: Box<[char]>,
    rows: u32,
    cols: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    EmptyGrid,
    RaggedRow { row: u32, expected: u32, found: u32 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::EmptyGrid => write!(f, "empty grid"),
            Error::RaggedRow { row, expected, found } => {
                write!(
                    f,
                    "row {} has {} letters but the grid is {} wide",
                    row + 1,
                    found,
                    expected,
                )
            },
        }
    }
}

impl std::error::Error for Error {}

impl Grid {
    // Build a grid with one row per line. Blank lines are skipped and
    // all of the letters are stored uppercase.
    pub fn new(s: &str) -> Result<Grid, Error> {
        Grid::from_rows(
            s.lines()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
        )
    }

    pub fn from_rows<I, S>(rows: I) -> Result<Grid, Error>
        where I: IntoIterator<Item = S>,
              S: AsRef<str>
    {
        let mut values = Vec::new();
        let mut cols = None;
        let mut n_rows = 0;

        for row in rows {
            let start = values.len();

            for ch in row.as_ref().chars() {
                values.extend(ch.to_uppercase());
            }

            let width = (values.len() - start) as u32;

            match cols {
                None => {
                    if width == 0 {
                        return Err(Error::EmptyGrid);
                    }
                    cols = Some(width);
                },
                Some(expected) if expected != width => {
                    return Err(Error::RaggedRow {
                        row: n_rows,
                        expected,
                        found: width,
                    });
                },
                Some(_) => (),
            }

            n_rows += 1;
        }

        let Some(cols) = cols
        else {
            return Err(Error::EmptyGrid);
        };

        Ok(Grid {
            values: values.into_boxed_slice(),
            rows: n_rows,
            cols,
        })
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    pub fn at(&self, cell: Cell) -> char {
        assert!(self.contains(cell));

        self.values[(cell.row * self.cols + cell.col) as usize]
    }

    pub fn index(&self, cell: Cell) -> usize {
        (cell.row * self.cols + cell.col) as usize
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| Cell { row, col })
        })
    }

    pub fn row_string(&self, row: u32) -> String {
        (0..self.cols).map(|col| self.at(Cell { row, col })).collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", self.row_string(row))?;
        }

        Ok(())
    }
}
