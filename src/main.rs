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

mod grid;
mod directions;
mod path;
mod word_finder;
mod rules;
mod session;
mod oracle;
mod puzzle_data;
mod puzzle;

use std::io::{BufRead, BufReader};
use std::{fs, process::ExitCode, ffi::OsString};
use clap::Parser;
use oracle::WordList;
use puzzle::Puzzle;
use puzzle_data::PuzzleData;
use rules::{Rules, UndoPolicy};
use session::{Session, Step};

// The terminal only ever has one “pointer”
const POINTER: session::PointerId = 0;

#[derive(Parser)]
#[command(name = "Strands")]
struct Cli {
    #[arg(value_name = "PUZZLE")]
    puzzle: OsString,
    #[arg(short, long, value_name = "FILE")]
    words: Option<OsString>,
    #[arg(short, long, value_name = "LENGTH")]
    minimum_length: Option<usize>,
    #[arg(short = 'c', long, value_name = "POINTS")]
    hint_cost: Option<u32>,
    #[arg(
        short,
        long,
        value_name = "POLICY",
        default_value_t = UndoPolicy::PreviousCell,
    )]
    undo: UndoPolicy,
}

fn print_board(puzzle: &Puzzle, session: &Session) {
    let frame = puzzle.frame(session);
    let grid = puzzle.grid();

    print!("   ");
    for col in 0..grid.cols() {
        print!(" {:^3}", col);
    }
    println!();

    for row in 0..grid.rows() {
        print!("{:>3}", row);

        for col in 0..grid.cols() {
            let cell = grid::Cell::new(row, col);
            let letter = grid.at(cell);

            let (open, close) = if frame.selected.contains(&cell) {
                ('<', '>')
            } else if frame.spangram.contains(&cell) {
                ('*', '*')
            } else if frame.found.contains(&cell) {
                ('[', ']')
            } else if frame.hinted.contains(&cell) {
                ('?', '?')
            } else {
                (' ', ' ')
            };

            print!(" {}{}{}", open, letter, close);
        }

        println!();
    }
}

fn print_status(puzzle: &mut Puzzle) {
    if let Some(message) = puzzle.pending_word_message() {
        println!("{}", message);
    }

    if puzzle.pending_spangram() {
        println!("You found the spangram!");
    }

    let total = puzzle.total_n_entries();

    if let Some(n_found) = puzzle.changed_n_found_entries() {
        println!("{} of {} theme words found", n_found, total);
    }

    if let Some(points) = puzzle.changed_points() {
        println!(
            "Points: {} (a hint costs {})",
            points,
            puzzle.rules().hint_cost,
        );
    }
}

// Feed a line of cells into the session as if a pointer had been
// dragged across them. A cell outside of the grid counts as the
// pointer leaving the board and cancels the selection.
fn select_cells(
    puzzle: &Puzzle,
    session: &mut Session,
    line: &str,
) -> Result<Option<path::Path>, puzzle_data::Error> {
    let cells = line.split_whitespace()
        .map(puzzle_data::parse_cell)
        .collect::<Result<Vec<_>, _>>()?;

    for (i, &cell) in cells.iter().enumerate() {
        if !puzzle.grid().contains(cell) {
            println!("{} is not on the board", cell);
            session.cancel_any();
            return Ok(None);
        }

        if i == 0 {
            session.start(POINTER, cell);
        } else if session.extend(POINTER, cell) == Step::Unchanged {
            log::info!("ignoring move to {}", cell);
        }
    }

    Ok(session.finish(POINTER))
}

fn play(
    puzzle: &mut Puzzle,
    words: &mut WordList,
) -> Result<(), std::io::Error> {
    let mut session = Session::new(puzzle.rules().undo_policy);

    println!("{}", puzzle.theme());
    print_status(puzzle);
    puzzle.changed_cells();
    print_board(puzzle, &session);

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();

        match line {
            "" => continue,
            "quit" => break,
            "hint" => {
                if let Err(e) = puzzle.use_hint() {
                    println!("{}", e);
                }
            },
            line => match select_cells(puzzle, &mut session, line) {
                Ok(Some(path)) => {
                    let word = path.word(puzzle.grid());

                    if !word.is_empty() {
                        println!("{}", word);
                    }

                    let outcome = puzzle.resolve_with(&path, words);

                    log::debug!("{}: {:?}", path, outcome);
                },
                Ok(None) => (),
                Err(e) => println!("{}", e),
            },
        }

        print_status(puzzle);

        if puzzle.changed_cells() {
            print_board(puzzle, &session);
        }

        if puzzle.pending_finish() {
            println!("Well done!");
            break;
        }
    }

    Ok(())
}

fn load_words(filename: &OsString) -> Result<WordList, std::io::Error> {
    WordList::read(BufReader::new(fs::File::open(filename)?))
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.puzzle) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}: {}", cli.puzzle.to_string_lossy(), e);
            return ExitCode::FAILURE;
        },
    };

    let puzzle_data = match source.parse::<PuzzleData>() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{}: {}", cli.puzzle.to_string_lossy(), e);
            return ExitCode::FAILURE;
        },
    };

    let mut words = match cli.words.as_ref() {
        Some(filename) => match load_words(filename) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("{}: {}", filename.to_string_lossy(), e);
                return ExitCode::FAILURE;
            },
        },
        None => WordList::new(),
    };

    log::info!("loaded {} words", words.len());

    let base = Rules {
        undo_policy: cli.undo,
        ..Rules::default()
    }.for_puzzle(&puzzle_data);

    let rules = Rules {
        min_word_length: cli.minimum_length.unwrap_or(base.min_word_length),
        hint_cost: cli.hint_cost.unwrap_or(base.hint_cost),
        ..base
    };

    let mut puzzle = match Puzzle::new(puzzle_data, rules) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}: {}", cli.puzzle.to_string_lossy(), e);
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = play(&mut puzzle, &mut words) {
        eprintln!("stdin: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
