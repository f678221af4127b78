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

// The eight neighbours of a cell, numbered in row-major order:
//
// 0 1 2
// 3 . 4
// 5 6 7

use super::grid::Cell;

pub const N_DIRECTIONS: u8 = 8;

const OFFSETS: [(i32, i32); N_DIRECTIONS as usize] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1), (0, 1),
    (1, -1), (1, 0), (1, 1),
];

pub fn step(cell: Cell, direction: u8) -> Cell {
    let (row_off, col_off) = OFFSETS[direction as usize];

    Cell {
        row: cell.row.wrapping_add_signed(row_off),
        col: cell.col.wrapping_add_signed(col_off),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::grid::is_adjacent;

    #[test]
    fn step_all_directions() {
        let c = Cell::new(2, 2);

        assert_eq!(step(c, 0), Cell::new(1, 1));
        assert_eq!(step(c, 1), Cell::new(1, 2));
        assert_eq!(step(c, 2), Cell::new(1, 3));
        assert_eq!(step(c, 3), Cell::new(2, 1));
        assert_eq!(step(c, 4), Cell::new(2, 3));
        assert_eq!(step(c, 5), Cell::new(3, 1));
        assert_eq!(step(c, 6), Cell::new(3, 2));
        assert_eq!(step(c, 7), Cell::new(3, 3));

        for dir in 0..N_DIRECTIONS {
            assert!(is_adjacent(c, step(c, dir)));
        }
    }

    #[test]
    fn overflow() {
        // Going off the top or left of the grid should wrap the
        // coordinates around the integer maximum so that the rest of
        // the program can easily detect invalid directions with just
        // a single comparison against the dimensions of the grid.
        assert_eq!(step(Cell::new(0, 0), 3), Cell::new(0, u32::MAX));
        assert_eq!(step(Cell::new(0, 0), 1), Cell::new(u32::MAX, 0));
    }
}
