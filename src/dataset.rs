use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::normalize::EventRow;

/// Header row of the persisted dataset, in `EventRow` field order.
pub const COLUMNS: [&str; 14] = [
    "collection_timestamp",
    "event_id",
    "event_name",
    "event_date",
    "team1",
    "score1",
    "team2",
    "score2",
    "team1_top_scorer",
    "team1_top_rebounder",
    "team1_top_assist",
    "team2_top_scorer",
    "team2_top_rebounder",
    "team2_top_assist",
];

#[derive(Debug, Clone)]
pub struct AppendSummary {
    pub path: PathBuf,
    pub rows_appended: usize,
    pub created: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupSummary {
    pub rows_in: usize,
    pub rows_out: usize,
    pub removed: usize,
}

/// Appends after the existing bytes without rewriting them. A missing or
/// empty file is created with the header first. Not atomic.
pub fn append_rows(path: &Path, rows: &[EventRow]) -> Result<AppendSummary> {
    let created = !path.exists()
        || fs::metadata(path)
            .with_context(|| format!("stat dataset {}", path.display()))?
            .len()
            == 0;

    if !created && rows.is_empty() {
        return Ok(AppendSummary {
            path: path.to_path_buf(),
            rows_appended: 0,
            created: false,
        });
    }

    ensure_parent_dir(path)?;
    // Existing files may carry the columns in any order; write in theirs.
    let order = if created {
        (0..COLUMNS.len()).collect::<Vec<_>>()
    } else {
        existing_column_order(path)?
    };
    let needs_newline = !created && !ends_with_newline(path)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open dataset {} for append", path.display()))?;
    if needs_newline {
        file.write_all(b"\n")
            .with_context(|| format!("write dataset {}", path.display()))?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    if created {
        writer
            .write_record(COLUMNS)
            .with_context(|| format!("write header to {}", path.display()))?;
    }
    for row in rows {
        let fields = row_fields(row);
        writer
            .write_record(order.iter().map(|&idx| fields[idx]))
            .with_context(|| format!("append row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush dataset {}", path.display()))?;

    Ok(AppendSummary {
        path: path.to_path_buf(),
        rows_appended: rows.len(),
        created,
    })
}

pub fn load_rows(path: &Path) -> Result<Vec<EventRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .from_path(path)
        .with_context(|| format!("open dataset {}", path.display()))?;
    let mut rows = Vec::new();
    for (idx, record) in reader.deserialize::<EventRow>().enumerate() {
        let row = record.with_context(|| format!("read row {} of {}", idx + 1, path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Full rewrite of `path`.
pub fn write_rows(path: &Path, rows: &[EventRow]) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("create dataset {}", path.display()))?;
    writer
        .write_record(COLUMNS)
        .with_context(|| format!("write header to {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("write row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush dataset {}", path.display()))?;
    Ok(())
}

/// Keeps the first row for each `(event_id, collection_timestamp)`, in order.
pub fn dedup_rows(rows: Vec<EventRow>) -> Vec<EventRow> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    rows.into_iter()
        .filter(|row| {
            let (event_id, collected_at) = row.dedup_key();
            seen.insert((event_id.to_string(), collected_at.to_string()))
        })
        .collect()
}

/// `input` is read completely before `output` is written, so both may be
/// the same path.
pub fn dedup_file(input: &Path, output: &Path) -> Result<(Vec<EventRow>, DedupSummary)> {
    let rows = load_rows(input)?;
    let rows_in = rows.len();
    let cleaned = dedup_rows(rows);
    write_rows(output, &cleaned)?;

    let summary = DedupSummary {
        rows_in,
        rows_out: cleaned.len(),
        removed: rows_in - cleaned.len(),
    };
    log::info!(
        "removed {} duplicate rows; cleaned data saved to {}",
        summary.removed,
        output.display()
    );
    Ok((cleaned, summary))
}

/// Values of `row` in `COLUMNS` order.
fn row_fields(row: &EventRow) -> [&str; 14] {
    [
        row.collection_timestamp.as_str(),
        row.event_id.as_str(),
        row.event_name.as_str(),
        row.event_date.as_str(),
        row.team1.as_str(),
        row.score1.as_str(),
        row.team2.as_str(),
        row.score2.as_str(),
        row.team1_top_scorer.as_str(),
        row.team1_top_rebounder.as_str(),
        row.team1_top_assist.as_str(),
        row.team2_top_scorer.as_str(),
        row.team2_top_rebounder.as_str(),
        row.team2_top_assist.as_str(),
    ]
}

/// For each column of the file's header, its index in `COLUMNS`. Fails
/// unless the header is exactly the `COLUMNS` set.
fn existing_column_order(path: &Path) -> Result<Vec<usize>> {
    let mut reader = csv::ReaderBuilder::new()
        .from_path(path)
        .with_context(|| format!("open dataset {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("read header of {}", path.display()))?;

    let mut order = Vec::with_capacity(COLUMNS.len());
    for name in headers.iter() {
        let Some(idx) = COLUMNS.iter().position(|col| *col == name.trim()) else {
            return Err(anyhow!(
                "dataset {} has unexpected column '{name}'",
                path.display()
            ));
        };
        if order.contains(&idx) {
            return Err(anyhow!(
                "dataset {} repeats column '{name}'",
                path.display()
            ));
        }
        order.push(idx);
    }
    if order.len() != COLUMNS.len() {
        return Err(anyhow!(
            "dataset {} has {} columns, expected {}",
            path.display(),
            order.len(),
            COLUMNS.len()
        ));
    }
    Ok(order)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    Ok(())
}

fn ends_with_newline(path: &Path) -> Result<bool> {
    let mut file = File::open(path).with_context(|| format!("open dataset {}", path.display()))?;
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
