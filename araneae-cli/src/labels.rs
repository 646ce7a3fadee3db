//! Reading label files and loading them into a table.
//! 读取标签文件并加载到表中。

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::thread;

use araneae_memory::{AtomTable, SharedAtomTable, TableConfig};
use tracing::debug;

use crate::output;

/// A table together with the number of labels fed into it.
pub struct Loaded {
    pub table: AtomTable,
    pub labels_read: usize,
}

/// Read every source into memory. An empty list means stdin.
pub fn read_sources(files: &[PathBuf]) -> Result<Vec<String>, String> {
    if files.is_empty() {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("cannot read stdin: {}", e))?;
        return Ok(vec![text]);
    }

    files
        .iter()
        .map(|file| {
            fs::read_to_string(file)
                .map_err(|e| format!("cannot read file '{}': {}", file.display(), e))
        })
        .collect()
}

/// Split text into labels, one per line.
///
/// Only the line terminator is stripped; blank lines are empty labels.
pub fn split_labels(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
}

/// Number of workers to start for a `--jobs` request.
///
/// Zero becomes one; anything above the machine's parallelism is capped to it.
pub fn effective_jobs(requested: usize) -> usize {
    let available = thread::available_parallelism().map_or(1, |n| n.get());

    if requested == 0 {
        output::warning("--jobs 0 is not valid, using 1");
        1
    } else if requested > available {
        output::warning(&format!(
            "--jobs {requested} exceeds available parallelism, using {available}"
        ));
        available
    } else {
        requested
    }
}

/// Intern the labels of `sources` with `jobs` worker threads.
/// 使用 `jobs` 个工作线程驻留 `sources` 中的标签。
pub fn load(sources: &[String], jobs: usize, config: &TableConfig) -> Result<Loaded, String> {
    let labels: Vec<&str> = sources.iter().flat_map(|text| split_labels(text)).collect();
    let labels_read = labels.len();

    let jobs = effective_jobs(jobs);

    if jobs == 1 {
        let mut table = AtomTable::from_config(config);
        table.extend(labels.iter().copied());
        return Ok(Loaded { table, labels_read });
    }

    let shared = SharedAtomTable::from_config(config).map_err(|e| e.to_string())?;
    let chunk_size = labels.len().div_ceil(jobs).max(1);
    debug!(jobs, chunk_size, labels = labels_read, "interning in parallel");

    thread::scope(|s| {
        let mut workers = Vec::with_capacity(jobs);
        let mut spawned: Result<(), String> = Ok(());

        for (n, chunk) in labels.chunks(chunk_size).enumerate() {
            let shared = &shared;
            let worker = thread::Builder::new()
                .name(format!("araneae-intern-{n}"))
                .spawn_scoped(s, move || {
                    for label in chunk {
                        shared.intern(label);
                    }
                });

            match worker {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    spawned = Err(format!("cannot start worker thread: {}", e));
                    break;
                }
            }
        }

        // Join what did start before reporting a spawn failure.
        let joined = workers
            .into_iter()
            .try_for_each(|worker| worker.join().map_err(|_| "worker thread panicked".to_string()));
        spawned.and(joined)
    })?;

    Ok(Loaded {
        table: shared.into_table(),
        labels_read,
    })
}
