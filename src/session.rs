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
use super::rules::UndoPolicy;
use log::debug;

// Identifies the input stream that owns a gesture. This is the
// pointerId of DOM pointer events.
pub type PointerId = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Selecting(PointerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Unchanged,
    Extended,
    Retracted,
}

// The drag gesture that is currently building a path. Only one
// pointer can own the gesture at a time.
pub struct Session {
    state: State,
    path: Path,
    undo_policy: UndoPolicy,
}

impl Session {
    pub fn new(undo_policy: UndoPolicy) -> Session {
        Session {
            state: State::Idle,
            path: Path::new(),
            undo_policy,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != State::Idle
    }

    pub fn pointer(&self) -> Option<PointerId> {
        match self.state {
            State::Idle => None,
            State::Selecting(pointer) => Some(pointer),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.path.contains(cell)
    }

    pub fn word(&self, grid: &Grid) -> String {
        self.path.word(grid)
    }

    fn owns(&self, pointer: PointerId) -> bool {
        self.state == State::Selecting(pointer)
    }

    pub fn start(&mut self, pointer: PointerId, cell: Cell) -> bool {
        if self.is_active() {
            return false;
        }

        self.path.clear();
        self.path.push(cell);
        self.state = State::Selecting(pointer);

        debug!("pointer {} started a selection at {}", pointer, cell);

        true
    }

    pub fn extend(&mut self, pointer: PointerId, cell: Cell) -> Step {
        if !self.owns(pointer) || self.path.last() == Some(cell) {
            return Step::Unchanged;
        }

        if self.path.second_to_last() == Some(cell) {
            self.path.pop();
            return Step::Retracted;
        }

        if let Some(pos) = self.path.position(cell) {
            return match self.undo_policy {
                UndoPolicy::PreviousCell => Step::Unchanged,
                UndoPolicy::AnyEarlierCell => {
                    self.path.truncate(pos + 1);
                    Step::Retracted
                },
            };
        }

        if self.path.push(cell) {
            Step::Extended
        } else {
            Step::Unchanged
        }
    }

    // Ends the gesture and hands back the path so that it can be
    // scored. The session is already idle when this returns.
    pub fn finish(&mut self, pointer: PointerId) -> Option<Path> {
        if !self.owns(pointer) {
            return None;
        }

        self.state = State::Idle;

        let path = std::mem::take(&mut self.path);

        debug!("pointer {} finished a selection: {}", pointer, path);

        Some(path)
    }

    pub fn cancel(&mut self, pointer: PointerId) -> bool {
        if self.owns(pointer) {
            self.cancel_any();
            true
        } else {
            false
        }
    }

    pub fn cancel_any(&mut self) {
        if let State::Selecting(pointer) = self.state {
            debug!("pointer {} cancelled its selection", pointer);
        }

        self.state = State::Idle;
        self.path.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use super::super::grid::is_adjacent;

    fn c(row: u32, col: u32) -> Cell {
        Cell::new(row, col)
    }

    #[test]
    fn start_extend_retract() {
        let mut session = Session::new(UndoPolicy::PreviousCell);

        assert_eq!(session.state(), State::Idle);
        assert!(session.start(1, c(0, 0)));
        assert_eq!(session.state(), State::Selecting(1));
        assert_eq!(session.path().len(), 1);

        assert_eq!(session.extend(1, c(0, 1)), Step::Extended);
        assert_eq!(session.path().len(), 2);

        assert_eq!(session.extend(1, c(0, 0)), Step::Retracted);
        assert_eq!(session.path().cells(), &[c(0, 0)]);

        // Moving over the same cell again does nothing
        assert_eq!(session.extend(1, c(0, 0)), Step::Unchanged);
        assert_eq!(session.path().len(), 1);
    }

    #[test]
    fn rejected_moves() {
        let mut session = Session::new(UndoPolicy::PreviousCell);

        session.start(1, c(1, 1));
        assert_eq!(session.extend(1, c(1, 3)), Step::Unchanged);
        assert_eq!(session.extend(1, c(2, 2)), Step::Extended);
        assert_eq!(session.extend(1, c(2, 1)), Step::Extended);
        assert_eq!(session.extend(1, c(1, 2)), Step::Extended);
        // The first cell is adjacent but already used and isn’t the
        // one before the last
        assert_eq!(session.extend(1, c(1, 1)), Step::Unchanged);
        assert_eq!(session.path().len(), 4);
    }

    #[test]
    fn undo_to_any_earlier_cell() {
        let mut session = Session::new(UndoPolicy::AnyEarlierCell);

        session.start(1, c(1, 1));
        session.extend(1, c(2, 2));
        session.extend(1, c(2, 1));
        session.extend(1, c(1, 2));

        assert_eq!(session.extend(1, c(1, 1)), Step::Retracted);
        assert_eq!(session.path().cells(), &[c(1, 1)]);
        assert!(!session.contains(c(2, 2)));
        assert_eq!(session.extend(1, c(2, 2)), Step::Extended);
    }

    #[test]
    fn single_owner() {
        let mut session = Session::new(UndoPolicy::PreviousCell);

        assert!(session.start(1, c(0, 0)));
        assert!(!session.start(2, c(3, 3)));
        assert!(!session.start(1, c(3, 3)));
        assert_eq!(session.pointer(), Some(1));

        assert_eq!(session.extend(2, c(0, 1)), Step::Unchanged);
        assert!(session.finish(2).is_none());
        assert!(!session.cancel(2));
        assert!(session.is_active());

        assert_eq!(session.extend(1, c(0, 1)), Step::Extended);
    }

    #[test]
    fn finish_and_cancel() {
        let grid = Grid::new("cat\ndog").unwrap();
        let mut session = Session::new(UndoPolicy::PreviousCell);

        assert!(session.finish(1).is_none());

        session.start(1, c(0, 0));
        session.extend(1, c(0, 1));
        session.extend(1, c(0, 2));
        assert_eq!(&session.word(&grid), "CAT");

        let path = session.finish(1).unwrap();
        assert_eq!(path.cells(), &[c(0, 0), c(0, 1), c(0, 2)]);
        assert!(!session.is_active());
        assert!(session.path().is_empty());
        assert_eq!(session.extend(1, c(1, 2)), Step::Unchanged);

        session.start(4, c(1, 0));
        session.extend(4, c(1, 1));
        assert!(session.cancel(4));
        assert!(!session.is_active());
        assert!(session.path().is_empty());
        assert!(session.finish(4).is_none());

        session.start(5, c(1, 0));
        session.cancel_any();
        assert_eq!(session.pointer(), None);
        assert!(session.start(6, c(1, 1)));
    }

    #[test]
    fn paths_stay_legal() {
        let grid = Grid::new("abcd\nefgh\nijkl\nmnop").unwrap();

        for undo_policy in [UndoPolicy::PreviousCell, UndoPolicy::AnyEarlierCell] {
            let mut session = Session::new(undo_policy);
            let mut seed = 12345u32;

            session.start(1, c(0, 0));

            for _ in 0..2000 {
                seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
                let row = (seed >> 16) % grid.rows();
                seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
                let col = (seed >> 16) % grid.cols();

                session.extend(1, c(row, col));

                let path = session.path();

                assert!(path.is_legal());
                assert!(
                    path.cells().windows(2).all(|w| is_adjacent(w[0], w[1]))
                );
            }
        }
    }
}
