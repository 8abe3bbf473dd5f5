use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::{
    CsvError,
    core::{field::CsvRecord, plan::FieldPlan},
};

use super::csv_encoder::{CsvEncoder, validate_dialect};

/// An element of a record source: either a record or an absent marker.
///
/// Implemented for `T`, `&T`, `Option<T>` and `Option<&T>`, so a writer accepts
/// owned records, borrowed records and sources that contain gaps.
pub trait MaybeRecord<T> {
    fn as_record(&self) -> Option<&T>;
}

impl<T: CsvRecord> MaybeRecord<T> for T {
    fn as_record(&self) -> Option<&T> {
        Some(self)
    }
}

impl<T: CsvRecord> MaybeRecord<T> for &T {
    fn as_record(&self) -> Option<&T> {
        Some(*self)
    }
}

impl<T: CsvRecord> MaybeRecord<T> for Option<T> {
    fn as_record(&self) -> Option<&T> {
        self.as_ref()
    }
}

impl<T: CsvRecord> MaybeRecord<T> for Option<&T> {
    fn as_record(&self) -> Option<&T> {
        *self
    }
}

/// Serializable settings of a [`CsvWriter`].
///
/// Missing keys take the defaults: `,` delimiter, `\r\n` line terminator, header on,
/// absent records skipped.
///
/// ```
/// use record_csv::item::csv::csv_writer::CsvWriterConfig;
///
/// let config = CsvWriterConfig::from_json(r#"{ "delimiter": ";", "include_header": false }"#).unwrap();
/// assert_eq!(config.delimiter, ';');
/// assert_eq!(config.line_terminator, "\r\n");
/// assert!(!config.include_header);
/// assert!(config.skip_null_records);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvWriterConfig {
    pub delimiter: char,
    pub line_terminator: String,
    pub include_header: bool,
    #[serde(alias = "ignore_null_elements")]
    pub skip_null_records: bool,
}

impl Default for CsvWriterConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            line_terminator: "\r\n".to_string(),
            include_header: true,
            skip_null_records: true,
        }
    }
}

impl CsvWriterConfig {
    /// Parses settings from JSON. Validation happens in [`CsvWriterBuilder::build`].
    pub fn from_json(json: &str) -> Result<Self, CsvError> {
        serde_json::from_str(json).map_err(|e| {
            CsvError::Configuration(format!("Unable to parse CSV writer config: {}", e))
        })
    }
}

/// Writes sequences of records as CSV, one column per declared field.
///
/// A writer is immutable once built and can be reused for any number of writes. Each
/// write owns its sink from the first line to the last; the sink is flushed and handed
/// back on success, and dropped on failure. Output already written before a failure
/// stays in the sink.
///
/// # Examples
///
/// ```
/// use record_csv::core::field::{CsvField, CsvRecord};
/// use record_csv::item::csv::csv_writer::CsvWriterBuilder;
///
/// struct TestClass {
///     field1: Option<String>,
///     field2: i32,
/// }
///
/// impl CsvRecord for TestClass {
///     fn csv_fields() -> Vec<CsvField<Self>> {
///         vec![
///             CsvField::new("field1", |r: &TestClass| r.field1.clone()).order(2).name("String"),
///             CsvField::new("field2", |r: &TestClass| r.field2).order(1).name("int"),
///         ]
///     }
/// }
///
/// let records = vec![
///     Some(TestClass { field1: Some("s1".to_string()), field2: 1 }),
///     Some(TestClass { field1: None, field2: 2 }),
///     None,
/// ];
///
/// let writer = CsvWriterBuilder::new()
///     .delimiter(',')
///     .line_terminator("\r\n")
///     .include_header(true)
///     .skip_null_records(false)
///     .build()
///     .unwrap();
///
/// let data = writer.write_to_string::<TestClass>(records).unwrap();
/// assert_eq!(data, "int,String\r\n1,s1\r\n2,\r\n,\r\n");
/// ```
#[derive(Debug, Clone)]
pub struct CsvWriter {
    config: CsvWriterConfig,
}

impl CsvWriter {
    pub fn config(&self) -> &CsvWriterConfig {
        &self.config
    }

    /// Writes `records` to `sink` using the cached field plan of `T`.
    ///
    /// The header (if enabled) is written first, then one line per element of the
    /// source, in iteration order. Absent elements are skipped or written as a row of
    /// empty columns, depending on `skip_null_records`. The sink is flushed and
    /// returned once the source is exhausted.
    pub fn write<T, W>(
        &self,
        records: impl IntoIterator<Item = impl MaybeRecord<T>>,
        sink: W,
    ) -> Result<W, CsvError>
    where
        T: CsvRecord,
        W: Write,
    {
        let plan = FieldPlan::<T>::of();
        self.write_with_plan(&plan, records, sink)
    }

    /// Same as [`CsvWriter::write`], with an explicitly supplied plan.
    pub fn write_with_plan<T, W>(
        &self,
        plan: &FieldPlan<T>,
        records: impl IntoIterator<Item = impl MaybeRecord<T>>,
        sink: W,
    ) -> Result<W, CsvError>
    where
        W: Write,
    {
        let result = self.encode(plan, records, sink);
        if let Err(err) = &result {
            error!("CSV write aborted: {}", err);
        }
        result
    }

    /// Writes a single record.
    pub fn write_record<T, W>(&self, record: &T, sink: W) -> Result<W, CsvError>
    where
        T: CsvRecord,
        W: Write,
    {
        self.write::<T, W>([record], sink)
    }

    /// Writes `records` to the file at `path`, creating or truncating it.
    ///
    /// An empty path is rejected before anything is created.
    pub fn write_to_path<T, P>(
        &self,
        records: impl IntoIterator<Item = impl MaybeRecord<T>>,
        path: P,
    ) -> Result<(), CsvError>
    where
        T: CsvRecord,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(CsvError::InvalidArgument(
                "Output path must not be empty".to_string(),
            ));
        }

        debug!("Writing CSV to {}", path.display());
        let file = File::create(path)?;
        self.write::<T, _>(records, BufWriter::new(file))?;
        Ok(())
    }

    /// Writes `records` into a new string.
    pub fn write_to_string<T>(
        &self,
        records: impl IntoIterator<Item = impl MaybeRecord<T>>,
    ) -> Result<String, CsvError>
    where
        T: CsvRecord,
    {
        let bytes = self.write::<T, _>(records, Vec::new())?;
        String::from_utf8(bytes)
            .map_err(|e| CsvError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    fn encode<T, W: Write>(
        &self,
        plan: &FieldPlan<T>,
        records: impl IntoIterator<Item = impl MaybeRecord<T>>,
        sink: W,
    ) -> Result<W, CsvError> {
        debug!("Start of CSV write ({} column(s))", plan.len());

        let mut encoder = CsvEncoder::new(
            sink,
            self.config.delimiter,
            &self.config.line_terminator,
        )?;

        if self.config.include_header {
            encoder.write_line(plan.field_names())?;
        }

        let mut written = 0usize;
        let mut skipped = 0usize;

        for element in records {
            match element.as_record() {
                Some(record) => {
                    let row = plan.field_values(record)?;
                    encoder.write_line(&row)?;
                }
                None if self.config.skip_null_records => {
                    skipped += 1;
                    continue;
                }
                None => encoder.write_line(&plan.empty_row())?,
            }
            written += 1;
        }

        let sink = encoder.finish()?;
        debug!(
            "End of CSV write: {} row(s) written, {} absent record(s) skipped",
            written, skipped
        );
        Ok(sink)
    }
}

/// Builder for [`CsvWriter`].
///
/// Defaults: `,` delimiter, `\r\n` line terminator, header on, absent records skipped.
/// The dialect is validated by [`CsvWriterBuilder::build`], never during a write.
///
/// ```
/// use record_csv::{CsvError, item::csv::csv_writer::CsvWriterBuilder};
///
/// let result = CsvWriterBuilder::new().delimiter('"').build();
/// assert!(matches!(result, Err(CsvError::Configuration(_))));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CsvWriterBuilder {
    config: CsvWriterConfig,
}

impl CsvWriterBuilder {
    pub fn new() -> CsvWriterBuilder {
        CsvWriterBuilder {
            config: CsvWriterConfig::default(),
        }
    }

    /// Starts from existing settings, e.g. loaded with [`CsvWriterConfig::from_json`].
    pub fn from_config(config: CsvWriterConfig) -> CsvWriterBuilder {
        CsvWriterBuilder { config }
    }

    pub fn delimiter(mut self, delimiter: char) -> CsvWriterBuilder {
        self.config.delimiter = delimiter;
        self
    }

    pub fn line_terminator(mut self, line_terminator: impl Into<String>) -> CsvWriterBuilder {
        self.config.line_terminator = line_terminator.into();
        self
    }

    pub fn include_header(mut self, yes: bool) -> CsvWriterBuilder {
        self.config.include_header = yes;
        self
    }

    pub fn skip_null_records(mut self, yes: bool) -> CsvWriterBuilder {
        self.config.skip_null_records = yes;
        self
    }

    /// Validates the settings and builds the writer.
    ///
    /// Fails with [`CsvError::Configuration`] if the delimiter is a double quote, or
    /// the line terminator is empty or contains the delimiter or a double quote.
    pub fn build(self) -> Result<CsvWriter, CsvError> {
        validate_dialect(self.config.delimiter, &self.config.line_terminator)?;
        Ok(CsvWriter {
            config: self.config,
        })
    }
}
