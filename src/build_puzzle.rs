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
mod puzzle_data;

use std::{process::ExitCode, ffi::OsString};
use clap::Parser;
use serde::Serialize;
use puzzle_data::PuzzleData;

#[derive(Parser)]
#[command(name = "Build")]
struct Cli {
    #[arg(required = true, value_name = "PUZZLE")]
    puzzles: Vec<OsString>,
    #[arg(short, long, value_name = "LENGTH")]
    minimum_length: Option<usize>,
    #[arg(short = 'c', long, value_name = "POINTS")]
    hint_cost: Option<u32>,
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryJson<'a> {
    word: &'a str,
    // Left as null if the word can’t be found in the grid
    solution: Option<Vec<[u32; 2]>>,
    spangram: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PuzzleJson<'a> {
    theme: &'a str,
    grid: Vec<String>,
    min_length: usize,
    hint_cost: u32,
    entries: Vec<EntryJson<'a>>,
}

impl<'a> PuzzleJson<'a> {
    fn new(
        puzzle: &'a PuzzleData,
        min_length: usize,
        hint_cost: u32,
    ) -> PuzzleJson<'a> {
        let grid = &puzzle.grid;

        PuzzleJson {
            theme: &puzzle.theme,
            grid: (0..grid.rows()).map(|row| grid.row_string(row)).collect(),
            min_length,
            hint_cost,
            entries: puzzle.entries.iter().map(|entry| {
                EntryJson {
                    word: &entry.word,
                    solution: entry.solution.as_ref().map(|path| {
                        path.cells().iter()
                            .map(|cell| [cell.row, cell.col])
                            .collect()
                    }),
                    spangram: entry.spangram,
                }
            }).collect(),
        }
    }
}

// A puzzle that has been checked along with the settings that the
// front end should play it with
struct Built {
    data: PuzzleData,
    min_length: usize,
    hint_cost: u32,
}

impl Built {
    fn json(&self) -> PuzzleJson {
        PuzzleJson::new(&self.data, self.min_length, self.hint_cost)
    }
}

fn build_puzzle(
    cli: &Cli,
    source: &str,
) -> Result<Built, puzzle_data::Error> {
    let mut data = source.parse::<PuzzleData>()?;

    let min_length = cli.minimum_length
        .or(data.min_word_length)
        .unwrap_or(puzzle_data::DEFAULT_MIN_WORD_LENGTH);
    let hint_cost = cli.hint_cost
        .or(data.hint_cost)
        .unwrap_or(puzzle_data::DEFAULT_HINT_COST);

    data.resolve_solutions(min_length)?;

    Ok(Built { data, min_length, hint_cost })
}

fn load_puzzle(
    cli: &Cli,
    filename: &OsString,
) -> Result<Built, Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(filename)?;
    let built = build_puzzle(cli, &source)?;

    log::info!(
        "{}: {} theme words",
        filename.to_string_lossy(),
        built.data.entries.len(),
    );

    Ok(built)
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let mut puzzles = Vec::with_capacity(cli.puzzles.len());

    for filename in cli.puzzles.iter() {
        match load_puzzle(&cli, filename) {
            Ok(puzzle) => puzzles.push(puzzle),
            Err(e) => {
                eprintln!("{}: {}", filename.to_string_lossy(), e);
                return ExitCode::FAILURE;
            },
        }
    }

    let json = puzzles.iter().map(Built::json).collect::<Vec<_>>();

    let result = if cli.pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    };

    match result {
        Ok(s) => {
            println!("{}", s);
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    static PETS: &'static str =
        "theme: Pets\n\
         hint-cost: 2\n\
         grid:\n\
         CAT\n\
         DOG\n\
         words:\n\
         CAT*\n\
         DOG 1,0 1,1 1,2\n\
         EMU\n";

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["build-puzzle"];
        argv.extend_from_slice(args);
        argv.push("pets");
        Cli::parse_from(argv)
    }

    #[test]
    fn json() {
        let built = build_puzzle(&cli(&[]), PETS).unwrap();

        assert_eq!(
            serde_json::to_string(&built.json()).unwrap(),
            "{\"theme\":\"Pets\",\
             \"grid\":[\"CAT\",\"DOG\"],\
             \"minLength\":3,\
             \"hintCost\":2,\
             \"entries\":[\
             {\"word\":\"CAT\",\"solution\":[[0,0],[0,1],[0,2]],\
             \"spangram\":true},\
             {\"word\":\"DOG\",\"solution\":[[1,0],[1,1],[1,2]],\
             \"spangram\":false},\
             {\"word\":\"EMU\",\"solution\":null,\"spangram\":false}\
             ]}",
        );
    }

    #[test]
    fn settings() {
        let built = build_puzzle(&cli(&["-m", "2", "-c", "5"]), PETS).unwrap();

        assert_eq!(built.min_length, 2);
        assert_eq!(built.hint_cost, 5);

        let e = build_puzzle(&cli(&["--minimum-length", "4"]), PETS)
            .err()
            .unwrap();

        assert_eq!(
            &e.to_string(),
            "CAT is shorter than the minimum word length",
        );
    }
}
