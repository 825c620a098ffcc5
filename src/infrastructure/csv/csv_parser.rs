// ============================================================
// CSV PARSER
// ============================================================
// Parse CSV input into a DataTable with delimiter auto-detection
// and encoding fallback. Parsing itself is delegated to the csv
// crate; this module is boundary plumbing, not the core.

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::WINDOWS_1252;

use crate::domain::error::AppError;
use crate::domain::{DataTable, TableRow};

/// CSV parser for one request's input
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,

    /// Optional cap on parsed data rows, applied while reading so
    /// oversized uploads never fully materialize
    max_rows: Option<usize>,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
            max_rows: None,
        }
    }
}

impl CsvParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Cap the number of parsed data rows
    pub fn with_max_rows(mut self, max_rows: Option<usize>) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Parse raw bytes, trying UTF-8 first and falling back to
    /// windows-1252 for legacy exports
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DataTable, AppError> {
        match std::str::from_utf8(bytes) {
            Ok(content) => self.parse_content(content),
            Err(_) => {
                let (content, _, _) = WINDOWS_1252.decode(bytes);
                self.parse_content(&content)
            }
        }
    }

    /// Parse CSV content from a string
    pub fn parse_content(&self, content: &str) -> Result<DataTable, AppError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .iter()
            .map(String::from)
            .collect();

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            if let Some(cap) = self.max_rows {
                if rows.len() >= cap {
                    break;
                }
            }

            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(Self::build_row(index, &headers, &record));
        }

        Ok(DataTable::new(headers, rows))
    }

    fn build_row(index: usize, headers: &[String], record: &StringRecord) -> TableRow {
        let mut values = HashMap::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            if let Some(value) = record.get(idx) {
                values.insert(header.clone(), value.to_string());
            }
        }
        TableRow::new(index, values, record.len())
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let sample_lines: Vec<_> = content.lines().take(10).collect();

            if sample_lines.is_empty() {
                continue;
            }

            let mut field_counts = Vec::new();
            for line in &sample_lines {
                let count = line.chars().filter(|&c| c as u8 == delimiter).count();
                field_counts.push(count);
            }

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());
            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }

    /// Parse with automatic delimiter detection over the first lines
    pub fn parse_content_auto_detect(&self, content: &str) -> Result<DataTable, AppError> {
        let delimiter = Self::detect_delimiter(content);
        let parser = Self {
            delimiter,
            trim: self.trim,
            max_rows: self.max_rows,
        };
        parser.parse_content(content)
    }
}
