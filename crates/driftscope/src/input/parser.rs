//! CSV/TSV loader with delimiter detection.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata};
use crate::error::{DriftError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Lines sampled for delimiter detection.
const DETECTION_LINES: usize = 10;

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Loads reference and production snapshots from delimited text files.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the data table and its provenance.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let contents = fs::read(path).map_err(|e| DriftError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let hash = format!("sha256:{:x}", Sha256::digest(&contents));

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let table = self.parse_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        };

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            contents.len() as u64,
            format.to_string(),
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse in-memory text with an explicit delimiter.
    pub fn parse_str(&self, text: &str, delimiter: u8) -> Result<DataTable> {
        self.parse_bytes(text.as_bytes(), delimiter)
    }

    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|h| h.trim().to_string()).collect()
        } else {
            Vec::new()
        };

        let mut rows = Vec::new();
        for (row_idx, record) in reader.records().enumerate() {
            if self.config.max_rows.is_some_and(|max| row_idx >= max) {
                break;
            }

            let record = record?;
            if headers.is_empty() {
                headers = (0..record.len()).map(|i| format!("column_{}", i + 1)).collect();
            }

            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            // Ragged rows are padded or cut to the header width.
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(DriftError::EmptyData("No columns found".to_string()));
        }

        if rows.is_empty() {
            return Err(DriftError::EmptyData("No data rows found".to_string()));
        }

        Ok(DataTable::new(headers, rows, delimiter))
    }
}

/// Detect the delimiter by scoring consistency over the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(DETECTION_LINES)
        .collect();

    if lines.is_empty() {
        return Err(DriftError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Consistent counts across lines dominate; tab wins ties.
        let score = if counts.iter().all(|&c| c == first_count) {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"Age,Balance,Exited\n42,1000.5,0\n37,0.0,1";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"Age\tBalance\tExited\n42\t1000.5\t0\n37\t0.0\t1";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted_commas() {
        let data = b"name;city\n\"Doe, Jane\";Paris\n\"Roe, Max\";Lyon";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let table = parser
            .parse_str("CreditScore,Geography,Exited\n650,France,0\n700,Spain,1", b',')
            .unwrap();

        assert_eq!(table.headers, vec!["CreditScore", "Geography", "Exited"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 1), Some("France"));
        assert_eq!(table.get(1, 0), Some("700"));
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let parser = Parser::new();
        let table = parser.parse_str("a,b,c\n1,2\n4,5,6", b',').unwrap();
        assert_eq!(table.get(0, 2), Some(""));
        assert_eq!(table.get(1, 2), Some("6"));
    }

    #[test]
    fn test_parse_respects_max_rows() {
        let parser = Parser::with_config(ParserConfig {
            max_rows: Some(1),
            ..ParserConfig::default()
        });
        let table = parser.parse_str("a\n1\n2\n3", b',').unwrap();
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_parse_without_header_names_columns() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..ParserConfig::default()
        });
        let table = parser.parse_str("1,x\n2,y", b',').unwrap();
        assert_eq!(table.headers, vec!["column_1", "column_2"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_parse_header_only_is_empty_data() {
        let parser = Parser::new();
        let err = parser.parse_str("a,b,c\n", b',').unwrap_err();
        assert!(matches!(err, DriftError::EmptyData(_)));
    }

    #[test]
    fn test_is_missing_value() {
        assert!(DataTable::is_missing_value(""));
        assert!(DataTable::is_missing_value("NA"));
        assert!(DataTable::is_missing_value("n/a"));
        assert!(DataTable::is_missing_value("NaN"));
        assert!(DataTable::is_missing_value("null"));
        assert!(DataTable::is_missing_value("None"));
        assert!(DataTable::is_missing_value("#N/A"));
        assert!(!DataTable::is_missing_value("0"));
        assert!(!DataTable::is_missing_value("France"));
    }
}
