use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::leader_rankings::{LeaderRanking, LeaderReport};
use crate::normalize::StatCategory;

pub const DEFAULT_TOP: usize = 10;

pub fn format_ranking_table(title: &str, ranking: &[LeaderRanking], top: usize) -> String {
    let shown = &ranking[..ranking.len().min(top)];
    let name_width = shown
        .iter()
        .map(|row| row.player.chars().count())
        .max()
        .unwrap_or(0)
        .max("player".len());

    let mut out = String::new();
    let _ = writeln!(out, "Overall {title}:");
    if shown.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return out;
    }
    let _ = writeln!(
        out,
        "{:<name_width$}  {:>11}  {:>16}",
        "player", "total_count", "overall_avg_stat"
    );
    for row in shown {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>11}  {:>16}",
            row.player,
            row.total_count,
            format_avg(row.overall_avg_stat)
        );
    }
    out
}

pub fn format_report(report: &LeaderReport, top: usize) -> String {
    StatCategory::ALL
        .iter()
        .map(|category| format_ranking_table(category.label(), report.get(*category), top))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_avg(value: Option<f64>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| format!("{v:.1}"))
}

pub fn export_rankings_xlsx(path: &Path, report: &LeaderReport) -> Result<()> {
    let mut workbook = Workbook::new();
    for category in StatCategory::ALL {
        let sheet = workbook.add_worksheet();
        sheet.set_name(sheet_name(category))?;
        write_ranking(sheet, report.get(category))?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    log::info!("rankings exported to {}", path.display());
    Ok(())
}

fn sheet_name(category: StatCategory) -> &'static str {
    match category {
        StatCategory::Points => "Scorers",
        StatCategory::Rebounds => "Rebounders",
        StatCategory::Assists => "Assists",
    }
}

fn write_ranking(worksheet: &mut Worksheet, ranking: &[LeaderRanking]) -> Result<()> {
    for (col, title) in ["Player", "Total Count", "Overall Avg Stat"].iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *title)
            .with_context(|| format!("write header cell {col}"))?;
    }
    for (idx, row) in ranking.iter().enumerate() {
        let row_idx = (idx + 1) as u32;
        worksheet
            .write_string(row_idx, 0, &row.player)
            .with_context(|| format!("write cell ({row_idx},0)"))?;
        worksheet
            .write_number(row_idx, 1, row.total_count as f64)
            .with_context(|| format!("write cell ({row_idx},1)"))?;
        // Undefined averages stay blank.
        if let Some(avg) = row.overall_avg_stat {
            worksheet
                .write_number(row_idx, 2, avg)
                .with_context(|| format!("write cell ({row_idx},2)"))?;
        }
    }
    Ok(())
}
