//! CSV parsing into [`RawRecord`]s, with encoding and delimiter auto-detection.
//!
//! Every column in [`REQUIRED_COLUMNS`] must be present in the header. Extra
//! columns are ignored. Text cells are kept verbatim, surrounding whitespace
//! included, and an empty one becomes `None`. Numeric cells must parse once
//! padding is trimmed.

use std::collections::HashMap;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{CsvError, CsvResult};
use crate::models::RawRecord;

/// Columns every input CSV must carry.
pub const REQUIRED_COLUMNS: [&str; 16] = [
    "client_id",
    "age",
    "job",
    "marital",
    "education",
    "credit_default",
    "mortgage",
    "number_contacts",
    "contact_duration",
    "previous_campaign_contacts",
    "previous_outcome",
    "campaign_outcome",
    "day",
    "month",
    "cons_price_idx",
    "euribor_three_months",
];

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Parsed rows
    pub records: Vec<RawRecord>,
    /// Detected encoding
    pub encoding: String,
    /// Detected delimiter
    pub delimiter: char,
    /// Column headers, as found in the file
    pub headers: Vec<String>,
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 is taken as-is; chardet only guesses for anything else.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "iso-8859-15" | "latin-9" | "latin9" => "iso-8859-15".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes to a string using the given encoding label.
///
/// UTF-8 falls back to lossy decoding. ISO-8859-1 is read as Windows-1252,
/// which agrees with it on every printable byte. A leading byte-order mark is
/// dropped.
pub fn decode_content(bytes: &[u8], encoding: &str, source_name: &str) -> CsvResult<String> {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => match String::from_utf8(bytes.to_vec()) {
            Ok(s) => s,
            Err(_) => String::from_utf8_lossy(bytes).into_owned(),
        },
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        "iso-8859-15" | "latin-9" | "latin9" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        label => {
            let encoding = encoding_rs::Encoding::for_label(label.as_bytes()).ok_or_else(|| {
                CsvError::Encoding {
                    source_name: source_name.to_string(),
                    encoding: label.to_string(),
                }
            })?;
            encoding.decode(bytes).0.into_owned()
        }
    };

    Ok(match decoded.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => decoded,
    })
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Falls back to a comma when no candidate appears.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse CSV bytes with auto-detection of encoding and delimiter.
///
/// `source_name` only appears in error messages and logs.
pub fn parse_bytes_auto(bytes: &[u8], source_name: &str) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding, source_name)?;
    let delimiter = detect_delimiter(&content);
    debug!(source = source_name, %encoding, ?delimiter, "decoded csv");

    let (headers, records) = parse_records(&content, delimiter, source_name)?;

    Ok(ParseResult {
        records,
        encoding,
        delimiter,
        headers,
    })
}

/// Parse CSV text with an explicit delimiter.
///
/// Returns the header row and one [`RawRecord`] per non-empty line.
pub fn parse_records(
    content: &str,
    delimiter: char,
    source_name: &str,
) -> CsvResult<(Vec<String>, Vec<RawRecord>)> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile {
            source_name: source_name.to_string(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| malformed(source_name, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let index = ColumnIndex::new(&headers, source_name)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| malformed(source_name, e))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let cells = Cells {
            row: &row,
            index: &index,
            source_name,
            line,
        };
        records.push(cells.to_raw_record()?);
    }

    Ok((headers, records))
}

fn malformed(source_name: &str, err: csv::Error) -> CsvError {
    CsvError::Malformed {
        source_name: source_name.to_string(),
        message: err.to_string(),
    }
}

/// Header position of every required column.
struct ColumnIndex {
    positions: HashMap<&'static str, usize>,
}

impl ColumnIndex {
    fn new(headers: &[String], source_name: &str) -> CsvResult<Self> {
        let mut positions = HashMap::with_capacity(REQUIRED_COLUMNS.len());
        for column in REQUIRED_COLUMNS {
            let pos = headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or_else(|| CsvError::MissingField {
                    source_name: source_name.to_string(),
                    line: 1,
                    field: column,
                })?;
            positions.insert(column, pos);
        }
        Ok(Self { positions })
    }
}

/// Typed access to the cells of one row.
struct Cells<'a> {
    row: &'a StringRecord,
    index: &'a ColumnIndex,
    source_name: &'a str,
    line: u64,
}

impl Cells<'_> {
    fn to_raw_record(&self) -> CsvResult<RawRecord> {
        Ok(RawRecord {
            client_id: self.number("client_id")?,
            age: self.number("age")?,
            job: self.text("job")?,
            marital: self.text("marital")?,
            education: self.text("education")?,
            credit_default: self.text("credit_default")?,
            mortgage: self.text("mortgage")?,
            number_contacts: self.number("number_contacts")?,
            contact_duration: self.number("contact_duration")?,
            previous_campaign_contacts: self.number("previous_campaign_contacts")?,
            previous_outcome: self.text("previous_outcome")?,
            campaign_outcome: self.text("campaign_outcome")?,
            day: self.number("day")?,
            month: self.text("month")?,
            cons_price_idx: self.number("cons_price_idx")?,
            euribor_three_months: self.number("euribor_three_months")?,
        })
    }

    fn cell(&self, field: &'static str) -> CsvResult<&str> {
        self.index
            .positions
            .get(field)
            .and_then(|&pos| self.row.get(pos))
            .ok_or_else(|| CsvError::MissingField {
                source_name: self.source_name.to_string(),
                line: self.line,
                field,
            })
    }

    fn text(&self, field: &'static str) -> CsvResult<Option<String>> {
        let value = self.cell(field)?;
        Ok((!value.is_empty()).then(|| value.to_string()))
    }

    fn number<T: FromStr>(&self, field: &'static str) -> CsvResult<T> {
        let value = self.cell(field)?;
        value.trim().parse().map_err(|_| CsvError::InvalidValue {
            source_name: self.source_name.to_string(),
            line: self.line,
            field,
            value: value.to_string(),
        })
    }
}
