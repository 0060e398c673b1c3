use crate::error::Result;
use crate::item::Utility;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use sysinfo::{Pid, ProcessesToUpdate, System};

#[derive(Clone, Default, PartialEq, Debug)]
pub struct MiningStats {
    pub transaction_count: usize,
    pub total_transaction_utility: Utility,
    pub hui_count: usize,
    // Joined utility lists constructed during the search.
    pub candidate_count: usize,
    // Items removed by TWU, extensions removed by the remaining utility
    // bound, and pairs removed by the EUCS.
    pub prune_count: usize,
    pub runtime: Duration,
    // Largest resident memory of the process seen while mining.
    pub peak_memory_mb: f64,
}

impl MiningStats {
    // Adds the search counters of another branch.
    pub fn merge(&mut self, other: &MiningStats) {
        self.hui_count += other.hui_count;
        self.candidate_count += other.candidate_count;
        self.prune_count += other.prune_count;
    }

    pub fn summary(&self) -> String {
        format!(
            "runtime: {} ms, high utility itemsets: {}, candidates: {}, pruned: {}, \
             transactions: {}, total transaction utility: {}, peak memory: {:.2} MB",
            self.runtime.as_millis(),
            self.hui_count,
            self.candidate_count,
            self.prune_count,
            self.transaction_count,
            self.total_transaction_utility,
            self.peak_memory_mb
        )
    }
}

/// Tracks the peak resident memory of this process across samples.
pub struct MemorySampler {
    system: System,
    pid: Option<Pid>,
    peak_bytes: u64,
}

impl MemorySampler {
    pub fn new() -> MemorySampler {
        MemorySampler {
            system: System::new(),
            pid: sysinfo::get_current_pid().ok(),
            peak_bytes: 0,
        }
    }

    pub fn sample(&mut self) {
        let pid = match self.pid {
            Some(pid) => pid,
            None => return,
        };
        self.system
            .refresh_processes(ProcessesToUpdate::Some(&[pid]), false);
        if let Some(process) = self.system.process(pid) {
            self.peak_bytes = self.peak_bytes.max(process.memory());
        }
    }

    pub fn peak_memory_mb(&self) -> f64 {
        self.peak_bytes as f64 / (1024.0 * 1024.0)
    }
}

static CSV_HEADER: &str = "min_utility,runtime_ms,hui_count,candidate_count,prune_count,\
                           transaction_count,total_transaction_utility,peak_memory_mb";

// Appends one row per run, writing the header first if the file is new.
pub fn append_csv(path: &Path, min_utility: Utility, stats: &MiningStats) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if file.metadata()?.len() == 0 {
        writeln!(file, "{}", CSV_HEADER)?;
    }
    writeln!(
        file,
        "{},{},{},{},{},{},{},{:.2}",
        min_utility,
        stats.runtime.as_millis(),
        stats.hui_count,
        stats.candidate_count,
        stats.prune_count,
        stats.transaction_count,
        stats.total_transaction_utility,
        stats.peak_memory_mb
    )?;
    Ok(())
}
