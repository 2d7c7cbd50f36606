//! `cafes list`: print every row in the store.

use anyhow::Result;

use crate::config::Config;
use crate::models::{CafeRow, COLUMNS};
use crate::store::CsvStore;

/// CLI entry point: read the store and print it as an aligned table.
pub fn run_list(config: &Config) -> Result<()> {
    let store = CsvStore::from_config(config);
    let rows: Vec<CafeRow> = store.list_all()?.collect::<Result<_>>()?;

    if rows.is_empty() {
        println!("No cafes in {}", store.path().display());
        return Ok(());
    }

    for line in format_table(&rows) {
        println!("{}", line.trim_end());
    }
    println!();
    println!("{} cafe(s)", rows.len());

    Ok(())
}

fn format_table(rows: &[CafeRow]) -> Vec<String> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0).max(COLUMNS.len());
    let mut widths = vec![0usize; columns];
    for (i, heading) in COLUMNS.iter().enumerate() {
        widths[i] = heading.chars().count();
    }
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let render = |cells: Vec<&str>| {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| pad(cell, widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render(COLUMNS.to_vec()));
    for row in rows {
        lines.push(render(row.iter().map(String::as_str).collect()));
    }
    lines
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{}{}", cell, " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_aligns_columns() {
        let rows = vec![vec![
            "Joe's".to_string(),
            "https://maps.example/x".to_string(),
            "8AM".to_string(),
            "5:30PM".to_string(),
            "☕️☕️☕️".to_string(),
            "✘".to_string(),
            "🔌".to_string(),
        ]];
        let lines = format_table(&rows);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Cafe Name  Location"));
        assert!(lines[1].starts_with("Joe's      https://maps.example/x"));
    }

    #[test]
    fn test_extra_columns_do_not_panic() {
        let rows = vec![(0..9).map(|i| i.to_string()).collect::<Vec<_>>()];
        let lines = format_table(&rows);
        assert!(lines[1].ends_with('8'));
    }
}
