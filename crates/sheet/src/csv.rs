use crate::cell::CellValue;
use crate::encoding::TextEncoding;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use std::collections::HashMap;
use std::path::Path;

/// How to read a delimited text table.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub quote: u8,
    /// First record holds the column names.
    pub has_headers: bool,
    /// Run [`CellValue::parse`] on every field; off keeps fields as text.
    pub infer_types: bool,
    pub encoding: TextEncoding,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            quote: b'"',
            has_headers: false,
            infer_types: true,
            encoding: TextEncoding::default(),
        }
    }
}

impl CsvOptions {
    #[must_use]
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    #[must_use]
    pub fn with_type_inference(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// Make header names usable as record keys.
///
/// Names are trimmed, a blank name becomes `Unnamed: {index}`, and a repeated
/// name gets a numeric suffix (`x`, `x.1`, `x.2`).
pub fn normalize_headers<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(raw.len());

    for (idx, name) in raw.iter().enumerate() {
        let trimmed = name.as_ref().trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            trimmed.to_string()
        };

        let mut candidate = base.clone();
        while seen.contains_key(&candidate) {
            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            candidate = format!("{base}.{count}");
        }
        seen.insert(candidate.clone(), 0);
        names.push(candidate);
    }

    names
}

impl Sheet {
    /// Read a delimited file, decoding it with `options.encoding`. The sheet
    /// is named after the file stem.
    pub fn from_csv_with_options<P: AsRef<Path>>(path: P, options: CsvOptions) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let mut sheet = Self::from_csv_bytes(&bytes, &options)?;
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            sheet.set_name(stem);
        }
        Ok(sheet)
    }

    /// Load a sheet from a CSV file, trying each encoding in turn.
    ///
    /// A decode failure moves on to the next encoding; any other failure is
    /// returned immediately. If no encoding fits, the last decode error is
    /// returned.
    pub fn from_csv_with_fallback<P: AsRef<Path>>(
        path: P,
        options: CsvOptions,
        encodings: &[TextEncoding],
    ) -> Result<Self> {
        let path = path.as_ref();
        let mut last_error = None;

        for (attempt, encoding) in encodings.iter().enumerate() {
            if attempt > 0 {
                tracing::warn!(
                    path = %path.display(),
                    encoding = %encoding,
                    "retrying with fallback encoding"
                );
            }

            let attempt_options = options.clone().with_encoding(encoding.clone());
            match Self::from_csv_with_options(path, attempt_options) {
                Err(err @ SheetError::Decode { .. }) => last_error = Some(err),
                other => return other,
            }
        }

        Err(last_error.unwrap_or_else(|| SheetError::NoEncodings {
            path: path.to_path_buf(),
        }))
    }

    /// Parse already-decoded text with default options.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_str_with_options(content, &CsvOptions::default())
    }

    /// Parse already-decoded text; `options.encoding` is not consulted.
    pub fn from_csv_str_with_options(content: &str, options: &CsvOptions) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut records = reader.records();
        let mut sheet = Sheet::new();

        let width = if options.has_headers {
            match records.next() {
                Some(header) => {
                    let names = normalize_headers(&header?.iter().collect::<Vec<_>>());
                    let width = names.len();
                    sheet.set_column_names(names);
                    Some(width)
                }
                None => {
                    sheet.set_column_names(Vec::new());
                    Some(0)
                }
            }
        } else {
            None
        };

        let mut truncated_rows = 0usize;
        for result in records {
            let record = result?;
            let mut row: Vec<CellValue> = record
                .iter()
                .map(|field| {
                    if options.infer_types {
                        CellValue::parse(field)
                    } else if field.trim().is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect();

            if let Some(width) = width {
                if row.len() > width {
                    truncated_rows += 1;
                }
                row.resize(width, CellValue::Empty);
            }
            sheet.push_row(row);
        }

        if truncated_rows > 0 {
            tracing::warn!(
                rows = truncated_rows,
                "dropped cells beyond the header width"
            );
        }

        Ok(sheet)
    }

    fn from_csv_bytes(bytes: &[u8], options: &CsvOptions) -> Result<Self> {
        let content = options.encoding.decode(bytes)?;
        Self::from_csv_str_with_options(&content, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::BIG5;
    use tempfile::tempdir;

    #[test]
    fn test_from_csv_str() {
        let csv = "name,age,city\nAlice,30,NYC\nBob,25,LA";
        let sheet = Sheet::from_csv_str(csv).unwrap();

        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.col_count(), 3);
        assert_eq!(sheet.cell(0, 0), &CellValue::Text("name".to_string()));
        assert_eq!(sheet.cell(1, 1), &CellValue::Int(30));
    }

    #[test]
    fn test_from_csv_with_headers() {
        let csv = " 代號 ,名稱\n2330,台積電\n0050,元大台灣50";
        let options = CsvOptions::default().with_headers(true);
        let sheet = Sheet::from_csv_str_with_options(csv, &options).unwrap();

        assert_eq!(sheet.column_names().unwrap(), &vec!["代號", "名稱"]);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.cell(0, 0), &CellValue::Int(2330));
        assert_eq!(sheet.cell(1, 0), &CellValue::Text("0050".to_string()));
    }

    #[test]
    fn test_ragged_rows_fit_header() {
        let csv = "a,b,c\n1\n1,2,3,4";
        let options = CsvOptions::default().with_headers(true);
        let sheet = Sheet::from_csv_str_with_options(csv, &options).unwrap();

        assert_eq!(sheet.rows().next().unwrap(), &vec![CellValue::Int(1), CellValue::Empty, CellValue::Empty]);
        assert_eq!(sheet.rows().nth(1).unwrap().len(), 3);
    }

    #[test]
    fn test_without_type_inference() {
        let csv = "a,b\n2330,";
        let options = CsvOptions::default()
            .with_headers(true)
            .with_type_inference(false);
        let sheet = Sheet::from_csv_str_with_options(csv, &options).unwrap();

        assert_eq!(sheet.cell(0, 0), &CellValue::Text("2330".to_string()));
        assert_eq!(sheet.cell(0, 1), &CellValue::Empty);
    }

    #[test]
    fn test_normalize_headers() {
        let names = normalize_headers(&["細產業", "", "細產業", " 細產業 ", "x.1", "x", "x"]);
        assert_eq!(
            names,
            vec!["細產業", "Unnamed: 1", "細產業.1", "細產業.2", "x.1", "x", "x.2"]
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let options = CsvOptions {
            delimiter: b';',
            ..CsvOptions::default()
        };
        let sheet = Sheet::from_csv_str_with_options("name;age\nAlice;30", &options).unwrap();

        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.cell(1, 1), &CellValue::Int(30));
    }

    #[test]
    fn test_fallback_encoding() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("StockList.csv");
        std::fs::write(&path, "\u{feff}代號,名稱\n2330,台積電\n").unwrap();

        let sheet = Sheet::from_csv_with_fallback(
            &path,
            CsvOptions::default().with_headers(true),
            &[TextEncoding::cp950(), TextEncoding::utf8()],
        )
        .unwrap();

        assert_eq!(sheet.name(), "StockList");
        assert_eq!(sheet.column_names().unwrap(), &vec!["代號", "名稱"]);
        assert_eq!(sheet.cell(0, 1), &CellValue::Text("台積電".to_string()));
    }

    #[test]
    fn test_fallback_exhausted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        let (bytes, _, _) = BIG5.encode("代號\n台積電\n");
        std::fs::write(&path, &bytes).unwrap();

        let result = Sheet::from_csv_with_fallback(
            &path,
            CsvOptions::default(),
            &[TextEncoding::utf8()],
        );
        assert!(matches!(result, Err(SheetError::Decode { .. })));

        let result = Sheet::from_csv_with_fallback(&path, CsvOptions::default(), &[]);
        assert!(matches!(result, Err(SheetError::NoEncodings { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = Sheet::from_csv_with_options("/nonexistent/stats.csv", CsvOptions::default());
        assert!(matches!(result, Err(SheetError::Io(_))));
    }
}
