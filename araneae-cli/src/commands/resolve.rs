//! The `araneae resolve` command.
//! `araneae resolve` 命令。

use std::path::PathBuf;

use araneae_memory::{AtomTable, TableConfig};

use crate::labels;

/// Intern the given files, then print the label with identity `id`.
/// 驻留给定文件，然后打印标识为 `id` 的标签。
pub fn run(id: u32, files: &[PathBuf], config: &TableConfig) -> Result<(), String> {
    let sources = labels::read_sources(files)?;
    let loaded = labels::load(&sources, 1, config)?;

    println!("{}", lookup(&loaded.table, id)?);
    Ok(())
}

fn lookup(table: &AtomTable, id: u32) -> Result<&str, String> {
    let atom = table.atom_at(id).map_err(|e| e.to_string())?;
    atom.label(table).map_err(|e| e.to_string())
}
