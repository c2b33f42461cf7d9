use clap::ValueEnum;
use fscore::models::{RankedTable, UniverseSelection};
use std::io::Write;

const TICKER_COLUMN: &str = "Ticker";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns with a caption
    #[default]
    Table,
    /// Comma-separated values with a header row
    Csv,
}

/// Writes the ranked table, ticker first and then the table's own columns.
pub fn render<W: Write>(
    table: &RankedTable,
    selection: UniverseSelection,
    format: OutputFormat,
    out: W,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => render_table(table, selection, out),
        OutputFormat::Csv => render_csv(table, out),
    }
}

fn header(table: &RankedTable) -> Vec<String> {
    let mut header = vec![TICKER_COLUMN.to_string()];
    header.extend(table.columns());
    header
}

fn records(table: &RankedTable) -> Vec<Vec<String>> {
    table
        .rows()
        .iter()
        .map(|row| {
            let mut record = vec![row.ticker.clone()];
            record.extend(row.cells());
            record
        })
        .collect()
}

fn render_table<W: Write>(table: &RankedTable, selection: UniverseSelection, mut out: W) -> anyhow::Result<()> {
    writeln!(out, "Piotroski F-Score ranking ({})", selection)?;

    let header = header(table);
    let records = records(table);

    let mut widths: Vec<usize> = header.iter().map(|name| name.chars().count()).collect();
    for record in &records {
        for (width, cell) in widths.iter_mut().zip(record) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_line(&mut out, &header, &widths)?;
    for record in &records {
        write_line(&mut out, record, &widths)?;
    }
    out.flush()?;
    Ok(())
}

fn write_line<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> anyhow::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())?;
    Ok(())
}

fn render_csv<W: Write>(table: &RankedTable, out: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(header(table))?;
    for record in records(table) {
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
