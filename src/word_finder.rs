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
use super::directions::{self, N_DIRECTIONS};

struct StackEntry {
    cell: Cell,
    next_direction: u8,
    letter_num: usize,
}

// Depth-first search for a route through the grid that spells a
// word. The buffers are kept between searches only to avoid
// reallocating them; none of their contents survive from one search
// to the next.
pub struct Finder {
    stack: Vec<StackEntry>,
    letters: Vec<char>,
    visited: Vec<bool>,
}

impl Finder {
    pub fn new() -> Finder {
        Finder {
            stack: Vec::new(),
            letters: Vec::new(),
            visited: Vec::new(),
        }
    }

    fn find_from_position(&mut self, grid: &Grid, start: Cell) -> bool {
        self.stack.clear();
        self.stack.push(StackEntry {
            cell: start,
            next_direction: 0,
            letter_num: 0,
        });

        self.visited.clear();
        self.visited.resize((grid.rows() * grid.cols()) as usize, false);

        while let Some(mut entry) = self.stack.pop() {
            let letter = self.letters.get(entry.letter_num).copied();

            if !grid.contains(entry.cell) ||
                self.visited[grid.index(entry.cell)] ||
                Some(grid.at(entry.cell)) != letter
            {
                // Backtrack
                while let Some(entry) = self.stack.pop() {
                    self.visited[grid.index(entry.cell)] = false;

                    if entry.next_direction < N_DIRECTIONS {
                        self.stack.push(entry);
                        break;
                    }
                }
            } else {
                self.visited[grid.index(entry.cell)] = true;

                let next_letter_num = entry.letter_num + 1;

                if next_letter_num >= self.letters.len() {
                    self.stack.push(entry);
                    return true;
                }

                let next_entry = StackEntry {
                    cell: directions::step(entry.cell, entry.next_direction),
                    next_direction: 0,
                    letter_num: next_letter_num,
                };

                entry.next_direction += 1;
                self.stack.push(entry);

                self.stack.push(next_entry);
            }
        }

        false
    }

    pub fn find(&mut self, grid: &Grid, word: &str) -> Option<Path> {
        self.letters.clear();
        self.letters.extend(word.chars().flat_map(char::to_uppercase));

        if self.letters.is_empty() {
            return None;
        }

        for start in grid.cells() {
            if grid.at(start) != self.letters[0] {
                continue;
            }

            if self.find_from_position(grid, start) {
                return Path::from_cells(
                    self.stack.iter().map(|entry| entry.cell)
                ).ok();
            }
        }

        None
    }
}

pub fn solve(grid: &Grid, word: &str) -> Option<Path> {
    Finder::new().find(grid, word)
}

#[cfg(test)]
mod test {
    use super::*;

    fn coords(path: &Path) -> Vec<(u32, u32)> {
        path.cells().iter().map(|c| (c.row, c.col)).collect()
    }

    #[test]
    fn single_row() {
        let grid = Grid::new("ABC").unwrap();
        let path = solve(&grid, "ABC").unwrap();

        assert_eq!(coords(&path), &[(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn all_directions() {
        let mut finder = Finder::new();

        // Lowercase letters are uppercased in the grid
        let grid = Grid::new(
            "abc\n\
             def\n\
             ghi"
        ).unwrap();

        let path = finder.find(&grid, "cba").unwrap();
        assert_eq!(coords(&path), &[(0, 2), (0, 1), (0, 0)]);

        let path = finder.find(&grid, "aei").unwrap();
        assert_eq!(coords(&path), &[(0, 0), (1, 1), (2, 2)]);

        let path = finder.find(&grid, "gec").unwrap();
        assert_eq!(coords(&path), &[(2, 0), (1, 1), (0, 2)]);

        let path = finder.find(&grid, "gda").unwrap();
        assert_eq!(coords(&path), &[(2, 0), (1, 0), (0, 0)]);

        let path = finder.find(&grid, "E").unwrap();
        assert_eq!(coords(&path), &[(1, 1)]);
    }

    #[test]
    fn backtrack() {
        let mut finder = Finder::new();

        let grid = Grid::new(
            "backtrap\n\
             xxxxxxck"
        ).unwrap();

        let path = finder.find(&grid, "backtrap").unwrap();
        assert_eq!(path.len(), 8);
        assert_eq!(path.cells()[7], Cell::new(0, 7));

        let path = finder.find(&grid, "backtrack").unwrap();
        assert_eq!(
            coords(&path),
            &[
                (0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5),
                (0, 6), (1, 6), (1, 7),
            ],
        );
        assert_eq!(&path.word(&grid), "BACKTRACK");
        assert!(path.is_legal());
    }

    #[test]
    fn not_found() {
        let mut finder = Finder::new();
        let grid = Grid::new("haystack").unwrap();
        assert!(finder.find(&grid, "needle").is_none());
        assert!(finder.find(&grid, "").is_none());

        let grid = Grid::new("now\nbog").unwrap();
        assert!(finder.find(&grid, "zoo").is_none());
        // Both letters are there but they don’t touch
        let grid = Grid::new("axb").unwrap();
        assert!(finder.find(&grid, "ab").is_none());
    }

    #[test]
    fn no_reuse() {
        let mut finder = Finder::new();
        let grid = Grid::new(
            "reu\n\
             esx"
        ).unwrap();

        // Make sure that the bottom ‘e’ was used for the last letter
        // instead of reusing the top ‘e’.
        let path = finder.find(&grid, "reuse").unwrap();
        assert_eq!(coords(&path), &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0)]);

        // There’s only one ‘r’
        assert!(finder.find(&grid, "reuser").is_none());

        // A word that could only be spelled by using a cell twice
        let grid = Grid::new("aba").unwrap();
        assert!(finder.find(&grid, "abab").is_none());
    }

    #[test]
    fn no_leak_between_searches() {
        let mut finder = Finder::new();
        let grid = Grid::new(
            "snot\n\
             mcaj"
        ).unwrap();

        let first = finder.find(&grid, "snot").unwrap();
        let again = finder.find(&grid, "snot").unwrap();

        assert_eq!(first, again);
        assert_eq!(first, solve(&grid, "snot").unwrap());
        assert!(finder.find(&grid, "cast").is_none());
        assert_eq!(&finder.find(&grid, "cans").unwrap().word(&grid), "CANS");
    }

    #[test]
    fn real_puzzle() {
        let grid = Grid::new(
            "SNOTTS\n\
             MCAJEN\n\
             ARIUTO\n\
             IRNSHH\n\
             NTGTOU\n\
             DEPSLG\n\
             DNEEUH\n\
             ENTXFT"
        ).unwrap();

        for word in [
            "SMART", "CARING", "HONEST", "THOUGHTFUL", "INDEPENDENT",
            "NOTJUSTSEX",
        ] {
            let path = solve(&grid, word).unwrap();
            assert_eq!(&path.word(&grid), word);
            assert!(path.is_legal());
        }
    }
}
