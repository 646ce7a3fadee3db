//! The `araneae stats` command.
//! `araneae stats` 命令。

use std::path::PathBuf;

use araneae_memory::TableConfig;

use crate::labels;

pub fn run(files: &[PathBuf], jobs: usize, config: &TableConfig, quiet: bool) -> Result<(), String> {
    let sources = labels::read_sources(files)?;
    let loaded = labels::load(&sources, jobs, config)?;

    if quiet {
        println!("{} {}", loaded.labels_read, loaded.table.size());
    } else {
        println!("labels read:    {}", loaded.labels_read);
        println!("distinct atoms: {}", loaded.table.size());
    }
    Ok(())
}
