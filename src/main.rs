mod command_line_args;
mod error;
mod eucs;
mod index;
mod item;
mod miner;
mod search;
mod sink;
mod stats;
#[cfg(test)]
mod test_support;
mod transaction;
mod transaction_reader;
mod twu;
mod utility_list;

use command_line_args::parse_args_or_exit;
use command_line_args::Arguments;
use error::Result;
use miner::Miner;
use sink::ItemsetWriter;
use stats::append_csv;
use transaction_reader::FileSource;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FHM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn mine_fhm(args: &Arguments) -> Result<()> {
    info!("Mining data set: {}", args.input_file_path);

    let source = FileSource::new(&args.input_file_path);
    let mut writer = ItemsetWriter::new(BufWriter::new(File::create(&args.output_file_path)?));
    let stats = Miner::new(args.min_utility)
        .with_max_itemset_length(args.max_itemset_length)
        .parallel(args.parallel)
        .mine(&source, &mut writer)?;
    writer.into_inner().flush()?;

    info!(
        "Wrote {} high utility itemsets to {}",
        stats.hui_count, args.output_file_path
    );
    println!("{}", stats.summary());

    if let Some(ref path) = args.stats_csv_path {
        append_csv(Path::new(path), args.min_utility, &stats)?;
    }

    Ok(())
}

fn main() {
    init_tracing();
    let arguments = parse_args_or_exit();

    if let Err(err) = mine_fhm(&arguments) {
        println!("Error: {}", err);
        process::exit(1);
    }
}
