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

use crate::miner::DEFAULT_MAX_ITEMSET_LENGTH;
use std::env;
use std::io;
use std::process;

use argparse::{ArgumentParser, Store, StoreOption, StoreTrue};

pub struct Arguments {
    pub input_file_path: String,
    pub output_file_path: String,
    pub min_utility: i64,
    pub max_itemset_length: usize,
    pub parallel: bool,
    pub stats_csv_path: Option<String>,
}

pub fn parse_args_or_exit() -> Arguments {
    let mut args: Arguments = Arguments {
        input_file_path: String::new(),
        output_file_path: String::new(),
        min_utility: 0,
        max_itemset_length: DEFAULT_MAX_ITEMSET_LENGTH,
        parallel: false,
        stats_csv_path: None,
    };

    {
        let mut parser = ArgumentParser::new();
        parser.set_description("High utility itemset mining with FHM in Rust.");

        parser
            .refer(&mut args.input_file_path)
            .add_option(
                &["--input"],
                Store,
                "Input dataset in SPMF utility format: items:transaction_utility:utilities.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut args.output_file_path)
            .add_option(
                &["--output"],
                Store,
                "File path in which to store high utility itemsets. \
                 Format: items #UTIL: utility.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut args.min_utility)
            .add_option(
                &["--min-utility"],
                Store,
                "Minimum itemset utility threshold, inclusive.",
            )
            .metavar("threshold")
            .required();

        parser
            .refer(&mut args.max_itemset_length)
            .add_option(
                &["--max-itemset-length"],
                Store,
                "Longest itemset the search may form; longer ones abort the run. Default 200.",
            )
            .metavar("length");

        parser.refer(&mut args.parallel).add_option(
            &["--parallel"],
            StoreTrue,
            "Search the subtree of each item in parallel.",
        );

        parser
            .refer(&mut args.stats_csv_path)
            .add_option(
                &["--stats-csv"],
                StoreOption,
                "CSV file to append run statistics to.",
            )
            .metavar("file_path");

        if env::args().count() == 1 {
            let _ = parser.print_help("Usage:", &mut io::stderr());
            process::exit(1);
        }

        match parser.parse_args() {
            Ok(()) => {}
            Err(err) => {
                process::exit(err);
            }
        }
    }

    if args.max_itemset_length < 1 {
        eprintln!("Maximum itemset length must be at least 1");
        process::exit(1);
    }

    args
}
