//! CSV reading and writing for distribution tables and trend matrices.
//!
//! Files are written as UTF-8 with a leading byte-order mark so spreadsheet
//! tools pick the right encoding; the mark is stripped again on read.

use crate::table::{ensure_unique_columns, DistributionTable, LabeledTable};
use crate::timeseries::TimeSeriesMatrix;
use crate::utils::config::{SENSOR_COLUMN_HEADER, TICK_COLUMN_HEADER};
use crate::utils::error::{OutputError, TableError};
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const UTF8_BOM: &str = "\u{feff}";

/// Write a distribution table to a CSV file
///
/// **Public** - main entry point for table output
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent
///   cannot be created
/// * `OutputError::WriteFailed` / `CsvFailed` - I/O error during write
pub fn write_distribution(
    table: &DistributionTable,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing distribution table to: {}", output_path.display());

    super::prepare_output(output_path)?;
    let file = File::create(output_path)?;
    write_distribution_to(table, BufWriter::new(file))?;

    info!(
        "Distribution table written ({} bytes)",
        super::file_size(output_path)
    );
    Ok(())
}

/// Serialize a distribution table to any writer
pub fn write_distribution_to<W: Write>(
    table: &DistributionTable,
    mut writer: W,
) -> Result<(), OutputError> {
    writer.write_all(UTF8_BOM.as_bytes())?;

    let mut csv_writer = ::csv::Writer::from_writer(writer);
    let mut header = vec![TICK_COLUMN_HEADER.to_string()];
    header.extend(table.columns().iter().cloned());
    csv_writer.write_record(&header)?;

    for (label, cells) in table.text_rows() {
        csv_writer.write_record(std::iter::once(label).chain(cells))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write a sensor x stage matrix to a CSV file
///
/// Missing cells are written empty.
pub fn write_matrix(
    matrix: &TimeSeriesMatrix,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing trend matrix to: {}", output_path.display());

    super::prepare_output(output_path)?;
    let mut writer = BufWriter::new(File::create(output_path)?);
    writer.write_all(UTF8_BOM.as_bytes())?;

    let mut csv_writer = ::csv::Writer::from_writer(writer);
    let mut header = vec![SENSOR_COLUMN_HEADER.to_string()];
    header.extend(matrix.stages().iter().cloned());
    csv_writer.write_record(&header)?;

    for sensor in matrix.sensors() {
        let cells = matrix
            .row(sensor)
            .into_iter()
            .map(|v| v.map(|v| v.to_string()).unwrap_or_default());
        csv_writer.write_record(std::iter::once(sensor.clone()).chain(cells))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Read any index-first CSV table
///
/// **Public** - used by merge and trend to load distribution tables
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::CsvFailed` - CSV syntax error
/// * `OutputError::InvalidTable` - No header, a repeated column name, or a row
///   wider than the header
pub fn read_table(input_path: impl AsRef<Path>) -> Result<LabeledTable, OutputError> {
    let input_path = input_path.as_ref();
    debug!("Reading table from: {}", input_path.display());

    let bytes = std::fs::read(input_path)?;
    let text = String::from_utf8_lossy(&bytes);
    let table = parse_table(text.strip_prefix(UTF8_BOM).unwrap_or(&text))?;

    debug!(
        "Table loaded: {} columns, {} rows",
        table.columns.len(),
        table.rows.len()
    );
    Ok(table)
}

/// Parse CSV text into a labeled table
pub fn parse_table(text: &str) -> Result<LabeledTable, OutputError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record?,
        None => {
            return Err(TableError::MalformedInput("table has no header row".to_string()).into())
        }
    };

    let mut fields = header.iter().map(str::to_string);
    let index_name = fields.next().unwrap_or_default();
    let columns: Vec<String> = fields.collect();
    ensure_unique_columns(&columns)?;

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let mut fields = record.iter().map(str::to_string);
        let Some(index) = fields.next() else {
            continue;
        };

        let mut cells: Vec<String> = fields.collect();
        if cells.len() > columns.len() {
            return Err(TableError::MalformedInput(format!(
                "row {:?} has {} cells but the header has {} columns",
                index,
                cells.len(),
                columns.len()
            ))
            .into());
        }
        cells.resize(columns.len(), String::new());
        rows.push((index, cells));
    }

    Ok(LabeledTable {
        index_name,
        columns,
        rows,
    })
}
