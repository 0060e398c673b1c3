// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{Error, Result};
use crate::item::{Item, ItemUtility, Utility};
use crate::transaction::{Transaction, TransactionSource};
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Reads transactions in the SPMF utility format, one per line:
///
/// `items:transaction_utility:item_utilities`
///
/// e.g. `3 5 1:15:2 8 5`.
pub struct TransactionReader<R> {
    reader: R,
    line_number: usize,
}

impl TransactionReader<BufReader<File>> {
    pub fn open(path: &Path) -> Result<TransactionReader<BufReader<File>>> {
        let file = File::open(path)?;
        Ok(TransactionReader::new(BufReader::new(file)))
    }
}

impl<R: BufRead> TransactionReader<R> {
    pub fn new(reader: R) -> TransactionReader<R> {
        TransactionReader {
            reader: reader,
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for TransactionReader<R> {
    type Item = Result<Transaction>;
    fn next(&mut self) -> Option<Result<Transaction>> {
        let mut line = String::new();
        loop {
            line.clear();
            let len = match self.reader.read_line(&mut line) {
                Ok(len) => len,
                Err(err) => return Some(Err(Error::from(err))),
            };
            if len == 0 {
                return None;
            }
            self.line_number += 1;
            let trimmed = line.trim();
            if is_skipped(trimmed) {
                continue;
            }
            return Some(parse_transaction(trimmed, self.line_number));
        }
    }
}

// Blank lines and SPMF comment / metadata lines.
fn is_skipped(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with('%') || line.starts_with('@')
}

fn parse_transaction(line: &str, line_number: usize) -> Result<Transaction> {
    let parse_error = |message: String| Error::Parse {
        line: line_number,
        message,
    };
    let sections: Vec<&str> = line.split(':').collect();
    if sections.len() != 3 {
        return Err(parse_error(format!(
            "expected 3 ':'-separated sections, found {}",
            sections.len()
        )));
    }
    let items: Vec<u32> = parse_all(sections[0], line_number)?;
    let transaction_utility: Utility = parse_one(sections[1].trim(), line_number)?;
    let utilities: Vec<Utility> = parse_all(sections[2], line_number)?;
    if items.len() != utilities.len() {
        return Err(parse_error(format!(
            "{} items but {} utilities",
            items.len(),
            utilities.len()
        )));
    }

    let pairs: Vec<ItemUtility> = items
        .into_iter()
        .zip(utilities)
        .map(|(id, utility)| ItemUtility::new(Item::with_id(id), utility))
        .collect();

    // Some input files have transactions with duplicate items.
    // Transaction::with_utility merges them.
    Ok(Transaction::with_utility(pairs, transaction_utility))
}

fn parse_all<T: FromStr>(section: &str, line_number: usize) -> Result<Vec<T>> {
    section
        .split_whitespace()
        .map(|token| parse_one(token, line_number))
        .collect()
}

fn parse_one<T: FromStr>(token: &str, line_number: usize) -> Result<T> {
    token.parse::<T>().map_err(|_| Error::Parse {
        line: line_number,
        message: format!("'{}' is not a valid integer", token),
    })
}

/// A database file, re-read from the start on every pass.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> FileSource {
        FileSource { path: path.into() }
    }
}

impl TransactionSource for FileSource {
    type Transactions = TransactionReader<BufReader<File>>;

    fn transactions(&self) -> Result<Self::Transactions> {
        TransactionReader::open(&self.path)
    }
}
