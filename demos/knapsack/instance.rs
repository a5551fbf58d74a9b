// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module is used to parse a knapsack instance from file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::ParseIntError;
use std::path::Path;

use knapbb::Item;

/// The maximum number of characters retained from an item name.
pub const MAX_NAME_LEN: usize = 64;

/// This enumeration simply groups the kind of errors that might occur when
/// parsing a knapsack instance from file. There can be io errors (file
/// unavailable ?), format errors (e.g. the file is not an instance but
/// contains the text of your next paper), or parse int errors (which are
/// actually a variant of the format error since it tells you that the parser
/// expected an integer number but got ... something else).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// There was an io related error
    #[error("io error {0}")]
    Io(#[from] std::io::Error),
    /// The parser expected to read something that was an integer but got some garbage
    #[error("parse int {0}")]
    ParseInt(#[from] ParseIntError),
    /// The file was not properly formatted.
    #[error("ill formed instance")]
    Format,
}

/// This function is used to read a knapsack instance from file. It returns
/// either the list of items if everything went on well or an error describing
/// the problem.
///
/// The expected format is that of the original solver: a first line carrying
/// the number of items, then one line per item telling its name, its profit
/// and its weight (blank separated). Names longer than `MAX_NAME_LEN` are
/// truncated.
pub fn read_instance<P: AsRef<Path>>(fname: P) -> Result<Vec<Item>, Error> {
    let f = File::open(fname)?;
    let f = BufReader::new(f);
    let mut lines = f.lines();

    let count = lines.next().ok_or(Error::Format)??;
    let count = count.trim().parse::<usize>()?;

    let mut items = vec![];
    for line in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut tokens = line.split_ascii_whitespace();
        let name = tokens.next().ok_or(Error::Format)?;
        let profit = tokens.next().ok_or(Error::Format)?.parse::<usize>()?;
        let weight = tokens.next().ok_or(Error::Format)?.parse::<usize>()?;

        let name = name.chars().take(MAX_NAME_LEN).collect::<String>();
        items.push(Item::new(name, profit, weight));
    }

    if items.len() != count {
        return Err(Error::Format);
    }
    Ok(items)
}
