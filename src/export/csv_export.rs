use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::{Transaction, DATE_FORMAT};

#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "ID")]
    id: &'a str,
    #[serde(rename = "Type")]
    kind: &'a str,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Notes")]
    notes: &'a str,
}

impl<'a> From<&'a Transaction> for ExportRow<'a> {
    fn from(txn: &'a Transaction) -> Self {
        Self {
            id: &txn.id,
            kind: txn.kind.as_str(),
            amount: txn.amount.to_string(),
            category: &txn.category,
            date: txn.date.format(DATE_FORMAT).to_string(),
            notes: &txn.notes,
        }
    }
}

/// Write the header and one row per transaction, in the order given.
/// Every field is quoted and embedded quotes are doubled.
pub(crate) fn write_csv<W: Write>(txns: &[Transaction], out: W) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(out);
    if txns.is_empty() {
        writer.write_record(["ID", "Type", "Amount", "Category", "Date", "Notes"])?;
    }
    for txn in txns {
        writer
            .serialize(ExportRow::from(txn))
            .with_context(|| format!("Failed to write transaction {}", txn.id))?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(txns.len())
}

pub(crate) fn export_to_csv(txns: &[Transaction], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(txns, file)
}

/// `$HOME/fintrack-transactions-YYYY-MM-DD.csv`, or the working directory
/// when no home directory is known.
pub(crate) fn default_export_path(today: NaiveDate) -> PathBuf {
    let base = directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(format!("fintrack-transactions-{}.csv", today.format(DATE_FORMAT)))
}

#[cfg(test)]
#[path = "csv_export_tests.rs"]
mod tests;
