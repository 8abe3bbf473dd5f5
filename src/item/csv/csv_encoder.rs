use std::{borrow::Cow, io::Write};

use crate::CsvError;

const QUOTE: char = '"';

/// Checks that a delimiter / line terminator pair can be escaped unambiguously.
pub(crate) fn validate_dialect(delimiter: char, line_terminator: &str) -> Result<(), CsvError> {
    if delimiter == QUOTE {
        return Err(CsvError::Configuration(
            "Can't use double quotes as delimiter".to_string(),
        ));
    }
    if line_terminator.is_empty() {
        return Err(CsvError::Configuration(
            "Line terminator must be specified".to_string(),
        ));
    }
    if line_terminator.contains(delimiter) || line_terminator.contains(QUOTE) {
        return Err(CsvError::Configuration(
            "Line terminator must not contain delimiter or double quotes".to_string(),
        ));
    }
    Ok(())
}

/// Writes rows of already formatted values as delimited, escaped, terminated lines.
///
/// The encoder owns its sink for its whole lifetime. [`CsvEncoder::finish`] flushes
/// and hands the sink back; if the encoder is dropped instead (for instance because a
/// write failed), the sink is dropped with it.
///
/// A value is wrapped in double quotes, with inner quotes doubled, when it contains
/// the delimiter, a double quote or the full line terminator sequence.
///
/// # Examples
///
/// ```
/// use record_csv::item::csv::csv_encoder::CsvEncoder;
///
/// let mut encoder = CsvEncoder::new(Vec::new(), ',', "\r\n").unwrap();
/// encoder.write_line(&["header1,", "header2"]).unwrap();
/// encoder.write_line(&["11\"", "22"]).unwrap();
/// encoder.write_line::<&str>(&[]).unwrap();
///
/// let data = String::from_utf8(encoder.finish().unwrap()).unwrap();
/// assert_eq!(data, "\"header1,\",header2\r\n\"11\"\"\",22\r\n");
/// ```
pub struct CsvEncoder<W: Write> {
    sink: W,
    delimiter: char,
    line_terminator: String,
    line: String,
}

impl<W: Write> CsvEncoder<W> {
    /// Creates an encoder over `sink`.
    ///
    /// Fails with [`CsvError::Configuration`] if the delimiter is a double quote or the
    /// line terminator is empty or contains the delimiter or a double quote.
    pub fn new(sink: W, delimiter: char, line_terminator: &str) -> Result<Self, CsvError> {
        validate_dialect(delimiter, line_terminator)?;
        Ok(Self {
            sink,
            delimiter,
            line_terminator: line_terminator.to_string(),
            line: String::new(),
        })
    }

    /// Encodes `values` as one line and appends it to the sink in a single write.
    ///
    /// An empty slice writes nothing at all, not even a line terminator.
    pub fn write_line<S: AsRef<str>>(&mut self, values: &[S]) -> Result<(), CsvError> {
        if values.is_empty() {
            return Ok(());
        }

        self.line.clear();
        for (index, value) in values.iter().enumerate() {
            if index > 0 {
                self.line.push(self.delimiter);
            }
            let escaped = escape(value.as_ref(), self.delimiter, &self.line_terminator);
            self.line.push_str(&escaped);
        }
        self.line.push_str(&self.line_terminator);

        self.sink.write_all(self.line.as_bytes())?;
        Ok(())
    }

    /// Returns `true` if `value` has to be quoted under this encoder's dialect.
    pub fn needs_quotes(&self, value: &str) -> bool {
        needs_quotes(value, self.delimiter, &self.line_terminator)
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Flushes the sink and gives it back.
    pub fn finish(mut self) -> Result<W, CsvError> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

fn needs_quotes(value: &str, delimiter: char, line_terminator: &str) -> bool {
    value.contains(QUOTE) || value.contains(delimiter) || value.contains(line_terminator)
}

fn escape<'a>(value: &'a str, delimiter: char, line_terminator: &str) -> Cow<'a, str> {
    if !needs_quotes(value, delimiter, line_terminator) {
        return Cow::Borrowed(value);
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push(QUOTE);
    for ch in value.chars() {
        if ch == QUOTE {
            quoted.push(QUOTE);
        }
        quoted.push(ch);
    }
    quoted.push(QUOTE);
    Cow::Owned(quoted)
}
