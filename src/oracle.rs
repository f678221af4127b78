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

use std::collections::HashSet;
use std::fmt;
use std::io::BufRead;

#[derive(Debug)]
pub enum OracleError {
    Request(String),
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OracleError::Request(message) => {
                write!(f, "word check failed: {}", message)
            },
        }
    }
}

impl std::error::Error for OracleError {}

// Decides whether a string that isn’t one of the theme words is a
// real word. An error is treated the same as a “no” by the game.
pub trait WordOracle {
    fn is_word(&mut self, word: &str) -> Result<bool, OracleError>;
}

// Oracle backed by a list of words held in memory
#[derive(Debug, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn new() -> WordList {
        WordList::default()
    }

    // Reads one word per line. Blank lines and lines starting with
    // ‘#’ are skipped.
    pub fn read<R: BufRead>(reader: R) -> Result<WordList, std::io::Error> {
        let mut list = WordList::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            if !line.is_empty() && !line.starts_with('#') {
                list.insert(line);
            }
        }

        Ok(list)
    }

    pub fn insert(&mut self, word: &str) {
        self.words.insert(word.to_uppercase());
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }
}

impl<S: AsRef<str>> FromIterator<S> for WordList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> WordList {
        let mut list = WordList::new();

        for word in iter {
            list.insert(word.as_ref());
        }

        list
    }
}

impl WordOracle for WordList {
    fn is_word(&mut self, word: &str) -> Result<bool, OracleError> {
        Ok(self.contains(word))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn read_list() {
        let source = "# Some words\n\
                      apple\n\
                      \n\
                      \x20 Banana  \n\
                      cherry\n";

        let mut list = WordList::read(source.as_bytes()).unwrap();

        assert_eq!(list.len(), 3);
        assert!(list.is_word("APPLE").unwrap());
        assert!(list.is_word("banana").unwrap());
        assert!(list.is_word("Cherry").unwrap());
        assert!(!list.is_word("# Some words").unwrap());
        assert!(!list.is_word("").unwrap());
    }

    #[test]
    fn collect() {
        let list = ["hug", "kiss"].into_iter().collect::<WordList>();

        assert!(list.contains("HUG"));
        assert!(!list.contains("date"));
    }

    #[test]
    fn error_message() {
        let e = OracleError::Request("status 500".to_string());
        assert_eq!(&e.to_string(), "word check failed: status 500");
    }
}
