//! Reads uploaded CSV and Excel files into header-keyed rows.

use std::collections::HashMap;
use std::fmt::Display;
use std::io::Cursor;

use calamine::{Data, Reader, Xls, Xlsx};
use csv::{ReaderBuilder, Trim};

use crate::import::ImportError;

/// File formats accepted by the import endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularFormat {
    Csv,
    Xlsx,
    Xls,
}

impl TabularFormat {
    /// Pick the format from the declared file name's extension (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Result<Self, ImportError> {
        let (_, ext) = file_name
            .rsplit_once('.')
            .ok_or(ImportError::UnsupportedFormat)?;
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" => Ok(Self::Xlsx),
            "xls" => Ok(Self::Xls),
            _ => Err(ImportError::UnsupportedFormat),
        }
    }
}

/// One data row, keyed by header name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    line: usize,
    cells: HashMap<String, String>,
}

impl Row {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// 1-based row number in the uploaded file; the header is row 1.
    pub fn line(&self) -> usize {
        self.line
    }
}

/// A parsed sheet: header names in file order plus the data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    /// Build from the header and `(line, cells)` records. All-empty records
    /// are dropped but the remaining rows keep their source line.
    fn from_records<I>(header: Vec<String>, records: I) -> Self
    where
        I: IntoIterator<Item = (usize, Vec<String>)>,
    {
        let mut columns: Vec<String> = Vec::with_capacity(header.len());
        for name in &header {
            if !name.is_empty() && !columns.contains(name) {
                columns.push(name.clone());
            }
        }

        let rows = records
            .into_iter()
            .filter(|(_, record)| record.iter().any(|cell| !cell.is_empty()))
            .map(|(line, record)| {
                let mut cells = HashMap::with_capacity(columns.len());
                for (position, name) in header.iter().enumerate() {
                    if name.is_empty() {
                        continue;
                    }
                    let value = record.get(position).cloned().unwrap_or_default();
                    // The first column with a given name wins.
                    cells.entry(name.clone()).or_insert(value);
                }
                Row { line, cells }
            })
            .collect();

        Self { columns, rows }
    }

    /// Required columns absent from the header, in the order they were asked for.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.columns.iter().any(|c| c == *name))
            .map(|name| name.to_string())
            .collect()
    }
}

/// Parse an uploaded file. The first row is the header; blank rows are skipped.
pub fn parse_table(file_name: &str, data: &[u8]) -> Result<Table, ImportError> {
    match TabularFormat::from_file_name(file_name)? {
        TabularFormat::Csv => parse_csv(data),
        TabularFormat::Xlsx => parse_workbook::<Xlsx<_>>(data),
        TabularFormat::Xls => parse_workbook::<Xls<_>>(data),
    }
}

fn parse_csv(data: &[u8]) -> Result<Table, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data);

    let mut records = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(processing)?;
        let line = record
            .position()
            .map_or(index + 1, |pos| pos.line() as usize);
        records.push((line, record.iter().map(str::to_string).collect::<Vec<_>>()));
    }

    let mut records = records.into_iter();
    let (_, mut header) = records
        .next()
        .ok_or_else(|| ImportError::Processing("No columns to parse from file".into()))?;
    if let Some(first) = header.first_mut() {
        *first = first.trim_start_matches('\u{feff}').to_string();
    }

    Ok(Table::from_records(header, records))
}

fn parse_workbook<R>(data: &[u8]) -> Result<Table, ImportError>
where
    R: Reader<Cursor<Vec<u8>>>,
    R::Error: Display,
{
    let mut workbook = R::new(Cursor::new(data.to_vec())).map_err(processing)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ImportError::Processing("Workbook contains no worksheets".into()))?
        .map_err(processing)?;

    // Absolute 0-based index of the header row; sheets may start below row 1.
    let header_row = range.start().map_or(0, |(row, _)| row as usize);
    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| ImportError::Processing("No columns to parse from file".into()))?
        .iter()
        .map(cell_text)
        .collect();
    let records = rows
        .enumerate()
        .map(|(offset, row)| (header_row + offset + 2, row.iter().map(cell_text).collect()));

    Ok(Table::from_records(header, records))
}

/// Render a spreadsheet cell the way it would appear in a CSV export.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        // Roll numbers typed as numbers come back as floats.
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        other => other.to_string().trim().to_string(),
    }
}

fn processing(err: impl Display) -> ImportError {
    ImportError::Processing(err.to_string())
}
