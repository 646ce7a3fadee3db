//! The `araneae intern` command.
//! `araneae intern` 命令。

use std::path::PathBuf;

use araneae_memory::{AtomTable, TableConfig};
use serde::Serialize;

use crate::labels;
use crate::output;

/// One row of the JSON listing.
#[derive(Serialize)]
struct Entry<'a> {
    id: u32,
    label: &'a str,
}

/// Intern the given files and print the table in identity order.
/// 驻留给定文件并按标识顺序打印表。
pub fn run(files: &[PathBuf], jobs: usize, json: bool, config: &TableConfig) -> Result<(), String> {
    let sources = labels::read_sources(files)?;
    let loaded = labels::load(&sources, jobs, config)?;

    if jobs > 1 {
        output::info("identities depend on thread scheduling with --jobs > 1");
    }

    let listing = if json {
        render_json(&loaded.table)?
    } else {
        render_text(&loaded.table)
    };
    print!("{listing}");
    Ok(())
}

fn render_text(table: &AtomTable) -> String {
    let mut out = String::new();
    for (atom, label) in table {
        out.push_str(&format!("{}\t{}\n", atom.index(), label));
    }
    out
}

fn render_json(table: &AtomTable) -> Result<String, String> {
    let entries: Vec<Entry<'_>> = table
        .iter()
        .map(|(atom, label)| Entry {
            id: atom.index(),
            label,
        })
        .collect();

    serde_json::to_string_pretty(&entries)
        .map(|mut text| {
            text.push('\n');
            text
        })
        .map_err(|e| format!("cannot encode table: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AtomTable {
        ["parent", "child", "parent", ""].into_iter().collect()
    }

    #[test]
    fn test_render_text() {
        assert_eq!(render_text(&sample()), "0\tparent\n1\tchild\n2\t\n");
    }

    #[test]
    fn test_render_json() {
        let text = render_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value.as_array().map(Vec::len), Some(3));
        assert_eq!(value[1]["id"], 1);
        assert_eq!(value[1]["label"], "child");
        assert_eq!(value[2]["label"], "");
    }
}
