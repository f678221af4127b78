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

// Fraction of the distance between two cell centres that a pointer
// has to be within to hit the cell. Anything below one half leaves a
// dead zone between the cells.
const HIT_FRACTION: f32 = 0.4;

pub struct Geometry {
    pub width: f32,
    pub height: f32,
    // Coordinates of the centre of the top left cell
    pub top_x: f32,
    pub top_y: f32,
    // Distance between the centres of neighbouring cells
    pub step: f32,
    // Radius of the circle drawn behind a letter
    pub radius: f32,
}

impl Geometry {
    pub fn new(grid: &Grid, viewport_width: f32) -> Geometry {
        let step = viewport_width / grid.cols() as f32;

        Geometry {
            width: viewport_width,
            height: step * grid.rows() as f32,
            top_x: step / 2.0,
            top_y: step / 2.0,
            step,
            radius: step * HIT_FRACTION,
        }
    }

    // Calculate the centre of a cell in the grid
    pub fn convert_coords(&self, cell: Cell) -> (f32, f32) {
        (
            self.top_x + cell.col as f32 * self.step,
            self.top_y + cell.row as f32 * self.step,
        )
    }

    // Return the cell whose hit area covers the given coordinates.
    // Points outside of every cell give a row or column of u32::MAX
    // so that they fail the grid’s bounds check.
    pub fn reverse_coords(&self, x: f32, y: f32) -> Cell {
        if x < 0.0 || y < 0.0 {
            return Cell::new(u32::MAX, u32::MAX);
        }

        let col = (x / self.step) as u32;
        let row = (y / self.step) as u32;
        let cell = Cell::new(row, col);

        let (center_x, center_y) = self.convert_coords(cell);
        let limit = self.step * HIT_FRACTION;

        if (x - center_x).abs() > limit || (y - center_y).abs() > limit {
            Cell::new(u32::MAX, u32::MAX)
        } else {
            cell
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn geometry() {
        let grid = Grid::new("abcd\nefgh").unwrap();
        let geometry = Geometry::new(&grid, 16.0);

        assert!((geometry.step - 4.0).abs() < 0.01);
        assert!((geometry.top_x - 2.0).abs() < 0.01);
        assert!((geometry.top_y - 2.0).abs() < 0.01);
        assert!((geometry.width - 16.0).abs() < 0.01);
        assert!((geometry.height - 8.0).abs() < 0.01);
    }

    #[test]
    fn convert_coords() {
        let grid = Grid::new("abcd\nefgh").unwrap();
        let geometry = Geometry::new(&grid, 16.0);

        let (center_x, center_y) = geometry.convert_coords(Cell::new(0, 0));

        assert!((center_x - 2.0).abs() < 0.01);
        assert!((center_y - 2.0).abs() < 0.01);

        let (center_x, center_y) = geometry.convert_coords(Cell::new(1, 3));

        assert!((center_x - 14.0).abs() < 0.01);
        assert!((center_y - 6.0).abs() < 0.01);
    }

    #[test]
    fn reverse_coords() {
        let grid = Grid::new("abcd\nefgh\nijkl").unwrap();
        let geometry = Geometry::new(&grid, 100.0);

        for cell in grid.cells() {
            let (x, y) = geometry.convert_coords(cell);
            assert_eq!(geometry.reverse_coords(x, y), cell);
            assert_eq!(geometry.reverse_coords(x + 9.0, y - 9.0), cell);
        }

        // Dead zone between two cells
        assert!(!grid.contains(geometry.reverse_coords(25.0, 12.5)));
        // Off the left and off the bottom
        assert!(!grid.contains(geometry.reverse_coords(-1.0, 12.5)));
        assert!(!grid.contains(geometry.reverse_coords(12.5, 80.0)));
    }
}
