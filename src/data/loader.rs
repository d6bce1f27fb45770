use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, AsArray, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type, Int64Type};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use super::model::{Article, ArticleDataset, Engagement, Metric, Reaction, Reactions};

/// Typed ingestion failures. Wrapped into `anyhow::Error` with file context.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing '{0}' column")]
    MissingColumn(&'static str),
    #[error("row {row}: cannot parse date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("column '{column}' has unsupported type {data_type}")]
    ColumnType { column: String, data_type: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an article dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – one row per article (recommended)
/// * `.json`    – `[{ "date": ..., "text": ..., "like": 3, ... }, ...]`
/// * `.csv`     – header row with the same column names
///
/// Required column: `date`. Optional: `text`, `fulltext`, the seven reaction
/// columns, `shares`, `comments_num`. Missing or null counts load as 0.
pub fn load_file(path: &Path) -> Result<ArticleDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} articles from {} (dates {:?})",
        dataset.len(),
        path.display(),
        dataset.date_bounds()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Parse a date or timestamp string, dropping any time of day.
///
/// Accepts `2024-01-31`, `2024-01-31 08:15:00[.123]`,
/// `2024-01-31T08:15:00[.123]` and RFC 3339 with an offset.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    for fmt in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

fn clamp_count(value: i64, column: &str, row: usize) -> u64 {
    if value < 0 {
        log::warn!("Row {row}: negative '{column}' count {value}, using 0");
        0
    } else {
        value as u64
    }
}

// ---------------------------------------------------------------------------
// JSON / CSV loaders (shared serde row)
// ---------------------------------------------------------------------------

/// A date cell: text, or epoch milliseconds as written by `df.to_json()`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    EpochMillis(i64),
}

/// One row as it appears in CSV / JSON. Counts are floats because pandas
/// exports integer columns with missing values as `5.0` / `NaN`.
#[derive(Debug, Deserialize)]
struct RawArticle {
    date: RawDate,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    fulltext: Option<String>,
    #[serde(default)]
    haha: Option<f64>,
    #[serde(default)]
    like: Option<f64>,
    #[serde(default)]
    wow: Option<f64>,
    #[serde(default)]
    angry: Option<f64>,
    #[serde(default)]
    sad: Option<f64>,
    #[serde(default)]
    love: Option<f64>,
    #[serde(default)]
    hug: Option<f64>,
    #[serde(default)]
    shares: Option<f64>,
    #[serde(default)]
    comments_num: Option<f64>,
}

impl RawArticle {
    fn into_article(self, row: usize) -> Result<Article, LoadError> {
        let date = match &self.date {
            RawDate::Text(s) => parse_date(s),
            RawDate::EpochMillis(ms) => DateTime::from_timestamp_millis(*ms).map(|dt| dt.date_naive()),
        }
        .ok_or_else(|| LoadError::InvalidDate {
            row,
            value: match &self.date {
                RawDate::Text(s) => s.clone(),
                RawDate::EpochMillis(ms) => ms.to_string(),
            },
        })?;

        let count = |v: Option<f64>, column: &str| match v {
            Some(f) if f.is_finite() => clamp_count(f as i64, column, row),
            _ => 0,
        };

        let mut reactions = Reactions::default();
        for (reaction, value) in Reaction::ALL.into_iter().zip([
            self.haha, self.like, self.wow, self.angry, self.sad, self.love, self.hug,
        ]) {
            reactions.set(reaction, count(value, reaction.column()));
        }
        let engagement = Engagement {
            shares: count(self.shares, "shares"),
            comments_num: count(self.comments_num, "comments_num"),
        };

        Ok(Article {
            date,
            text: self.text,
            fulltext: self.fulltext,
            reactions,
            engagement,
        })
    }
}

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "date": "2024-01-31", "text": "...", "fulltext": null, "like": 12, "shares": 3 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<ArticleDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<RawArticle> = serde_json::from_str(&text).context("parsing JSON")?;

    let articles = rows
        .into_iter()
        .enumerate()
        .map(|(i, raw)| raw.into_article(i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ArticleDataset::from_articles(articles))
}

fn load_csv(path: &Path) -> Result<ArticleDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?;
    if !headers.iter().any(|h| h == "date") {
        return Err(LoadError::MissingColumn("date").into());
    }

    let mut articles = Vec::new();
    for (row_no, result) in reader.deserialize::<RawArticle>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        articles.push(raw.into_article(row_no)?);
    }

    Ok(ArticleDataset::from_articles(articles))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one article per row.
///
/// Column types are normalised through Arrow casts:
/// - `date`: Utf8 (parsed as text), Date32, Date64 or Timestamp of any unit
/// - `text`, `fulltext`: any type castable to Utf8 (nullable)
/// - metric columns: any numeric type, cast to Int64 (nulls load as 0)
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<ArticleDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut articles = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = articles.len();
        articles.extend(articles_from_batch(&batch, offset)?);
    }

    Ok(ArticleDataset::from_articles(articles))
}

// -- Parquet / Arrow helpers --

fn articles_from_batch(batch: &RecordBatch, row_offset: usize) -> Result<Vec<Article>> {
    let date_col = batch
        .column_by_name("date")
        .ok_or(LoadError::MissingColumn("date"))?;
    let dates = date_values(date_col, row_offset)?;

    let text = optional_utf8(batch, "text")?;
    let fulltext = optional_utf8(batch, "fulltext")?;

    let mut metrics: Vec<(Metric, Option<Int64Array>)> = Vec::with_capacity(Metric::COUNT);
    for metric in Metric::ALL {
        let values = match batch.column_by_name(metric.column()) {
            Some(col) => {
                let ints = cast(col, &DataType::Int64)
                    .with_context(|| format!("casting '{}' to Int64", metric.column()))?;
                Some(ints.as_primitive::<Int64Type>().clone())
            }
            None => {
                if row_offset == 0 {
                    log::warn!("No '{}' column, counts load as 0", metric.column());
                }
                None
            }
        };
        metrics.push((metric, values));
    }

    let articles = dates
        .into_iter()
        .enumerate()
        .map(|(row, date)| {
            let global_row = row_offset + row;
            let mut reactions = Reactions::default();
            let mut engagement = Engagement::default();
            for (metric, values) in &metrics {
                let value = values
                    .as_ref()
                    .filter(|arr| !arr.is_null(row))
                    .map(|arr| clamp_count(arr.value(row), metric.column(), global_row))
                    .unwrap_or(0);
                match metric {
                    Metric::Reaction(r) => reactions.set(*r, value),
                    Metric::Shares => engagement.shares = value,
                    Metric::CommentsNum => engagement.comments_num = value,
                }
            }
            Article {
                date,
                text: string_at(text.as_ref(), row),
                fulltext: string_at(fulltext.as_ref(), row),
                reactions,
                engagement,
            }
        })
        .collect();

    Ok(articles)
}

/// Decode the `date` column to calendar days.
fn date_values(col: &ArrayRef, row_offset: usize) -> Result<Vec<NaiveDate>> {
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let strings = cast(col, &DataType::Utf8).context("casting 'date' to Utf8")?;
            let strings = strings.as_string::<i32>();
            (0..strings.len())
                .map(|row| {
                    let value = if strings.is_null(row) { "" } else { strings.value(row) };
                    parse_date(value).ok_or_else(|| {
                        LoadError::InvalidDate {
                            row: row_offset + row,
                            value: value.to_string(),
                        }
                        .into()
                    })
                })
                .collect()
        }
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
            let days = cast(col, &DataType::Date32).context("casting 'date' to Date32")?;
            let days = days.as_primitive::<Date32Type>();
            (0..days.len())
                .map(|row| {
                    days.value_as_date(row)
                        .filter(|_| !days.is_null(row))
                        .ok_or_else(|| {
                            LoadError::InvalidDate {
                                row: row_offset + row,
                                value: "<null>".to_string(),
                            }
                            .into()
                        })
                })
                .collect()
        }
        other => Err(LoadError::ColumnType {
            column: "date".to_string(),
            data_type: format!("{other:?}"),
        }
        .into()),
    }
}

fn optional_utf8(batch: &RecordBatch, name: &str) -> Result<Option<StringArray>> {
    let Some(col) = batch.column_by_name(name) else {
        return Ok(None);
    };
    let strings = cast(col, &DataType::Utf8).map_err(|_| LoadError::ColumnType {
        column: name.to_string(),
        data_type: format!("{:?}", col.data_type()),
    })?;
    Ok(Some(strings.as_string::<i32>().clone()))
}

fn string_at(col: Option<&StringArray>, row: usize) -> Option<String> {
    col.filter(|arr| !arr.is_null(row))
        .map(|arr| arr.value(row).to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Date32Array, Float64Array, Int64Array, TimestampMillisecondArray};
    use arrow::datatypes::{Field, Schema, TimeUnit};
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn write_parquet(batch: &RecordBatch) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        file
    }

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_date_variants() {
        assert_eq!(parse_date("2024-01-31"), Some(day(2024, 1, 31)));
        assert_eq!(parse_date("2024-01-31 23:59:59"), Some(day(2024, 1, 31)));
        assert_eq!(parse_date("2024-01-31T08:15:00.250"), Some(day(2024, 1, 31)));
        assert_eq!(parse_date("2024-01-31T08:15:00+02:00"), Some(day(2024, 1, 31)));
        assert_eq!(parse_date(" 2024-02-01 "), Some(day(2024, 2, 1)));
        assert_eq!(parse_date("31.01.2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn loads_csv_with_missing_fields() {
        let file = write_temp(
            ".csv",
            "date,text,fulltext,like,haha,shares,comments_num,extra\n\
             2024-01-01 10:00:00,green energy,,5,1.0,2,3,x\n\
             2024-01-02,,Full text only,,,,,y\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);

        let first = ds.get(0).unwrap();
        assert_eq!(first.date, day(2024, 1, 1));
        assert_eq!(first.text.as_deref(), Some("green energy"));
        assert_eq!(first.reactions.like, 5);
        assert_eq!(first.reactions.haha, 1);
        assert_eq!(first.reactions.hug, 0);
        assert_eq!(first.engagement.shares, 2);
        assert_eq!(first.engagement.comments_num, 3);

        let second = ds.get(1).unwrap();
        assert_eq!(second.text_or_empty(), "");
        assert_eq!(second.fulltext.as_deref(), Some("Full text only"));
        assert_eq!(second.reactions.like, 0);
    }

    #[test]
    fn csv_without_date_column_fails() {
        let file = write_temp(".csv", "text,like\nhello,1\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("missing 'date' column"), "{err:#}");
    }

    #[test]
    fn bad_date_is_fatal() {
        let file = write_temp(".csv", "date,text\nyesterday,hello\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("yesterday"), "{err:#}");
    }

    #[test]
    fn loads_json_records_with_epoch_dates() {
        let file = write_temp(
            ".json",
            r#"[
                {"date": 1704103200000, "text": "Grün", "fulltext": null, "wow": 4, "shares": null},
                {"date": "2024-01-05", "text": null, "love": 2, "comments_num": 7.0}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(0).unwrap().date, day(2024, 1, 1));
        assert_eq!(ds.get(0).unwrap().reactions.wow, 4);
        assert_eq!(ds.get(0).unwrap().engagement.shares, 0);
        assert_eq!(ds.get(1).unwrap().reactions.love, 2);
        assert_eq!(ds.get(1).unwrap().engagement.comments_num, 7);
        assert_eq!(ds.date_bounds(), Some((day(2024, 1, 1), day(2024, 1, 5))));
    }

    #[test]
    fn negative_counts_clamp_to_zero() {
        let file = write_temp(".json", r#"[{"date": "2024-01-01", "like": -3}]"#);
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.get(0).unwrap().reactions.like, 0);
    }

    #[test]
    fn unsupported_extension() {
        let file = write_temp(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported file extension: .xlsx"));
    }

    #[test]
    fn loads_parquet_with_timestamp_dates() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("date", DataType::Timestamp(TimeUnit::Millisecond, None), false),
            Field::new("text", DataType::Utf8, true),
            Field::new("like", DataType::Int64, true),
            Field::new("shares", DataType::Float64, true),
        ]));
        // 2024-01-01T10:00:00Z and 2024-01-02T23:30:00Z
        let dates = TimestampMillisecondArray::from(vec![1_704_103_200_000, 1_704_238_200_000]);
        let text = StringArray::from(vec![Some("grüne Politik"), None]);
        let like = Int64Array::from(vec![Some(8), None]);
        let shares = Float64Array::from(vec![Some(2.0), Some(5.0)]);
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![Arc::new(dates), Arc::new(text), Arc::new(like), Arc::new(shares)],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        let first = ds.get(0).unwrap();
        assert_eq!(first.date, day(2024, 1, 1));
        assert_eq!(first.text.as_deref(), Some("grüne Politik"));
        assert_eq!(first.reactions.like, 8);
        assert_eq!(first.engagement.shares, 2);
        let second = ds.get(1).unwrap();
        assert_eq!(second.date, day(2024, 1, 2));
        assert_eq!(second.text, None);
        assert_eq!(second.reactions.like, 0);
        assert_eq!(second.engagement.shares, 5);
    }

    #[test]
    fn parquet_string_dates_report_bad_row() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("date", DataType::Utf8, true),
            Field::new("like", DataType::Int64, false),
        ]));
        let good = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["2024-01-01 08:00:00", "2024-01-03"])),
                Arc::new(Int64Array::from(vec![1, 2])),
            ],
        )
        .unwrap();
        let ds = load_file(write_parquet(&good).path()).unwrap();
        assert_eq!(ds.date_bounds(), Some((day(2024, 1, 1), day(2024, 1, 3))));
        assert_eq!(ds.get(1).unwrap().reactions.like, 2);

        let bad = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["2024-01-01", "2024-01-02", "not a date"])),
                Arc::new(Int64Array::from(vec![1, 2, 3])),
            ],
        )
        .unwrap();
        let err = load_file(write_parquet(&bad).path()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("row 2: cannot parse date 'not a date'"), "{msg}");
    }

    #[test]
    fn loads_parquet_with_date32_dates() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("date", DataType::Date32, false),
            Field::new("fulltext", DataType::Utf8, true),
        ]));
        // Days since the epoch: 19723 = 2024-01-01
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Date32Array::from(vec![19723, 19725])),
                Arc::new(StringArray::from(vec![None, Some("Volltext")])),
            ],
        )
        .unwrap();
        let ds = load_file(write_parquet(&batch).path()).unwrap();
        assert_eq!(ds.get(0).unwrap().date, day(2024, 1, 1));
        assert_eq!(ds.get(1).unwrap().date, day(2024, 1, 3));
        assert_eq!(ds.get(0).unwrap().fulltext, None);
        assert_eq!(ds.get(1).unwrap().fulltext.as_deref(), Some("Volltext"));
        assert_eq!(ds.get(1).unwrap().reactions, Reactions::default());
    }
}
