//! CSV output for record types that declare their fields.
//!
//! # Module Architecture
//!
//! The CSV module consists of two main components:
//!
//! 1. **CsvEncoder**: turns an ordered row of strings into one delimited, escaped and
//!    terminated line, and appends it to a sink implementing `Write`.
//!
//! 2. **CsvWriter**: takes a record source and a sink, resolves the
//!    [`FieldPlan`](crate::core::plan::FieldPlan) of the record type, writes the header
//!    and then one row per element of the source.
//!
//! The writer is configured with a builder (or a serde-loaded
//! [`CsvWriterConfig`](csv_writer::CsvWriterConfig)) and validated once, at build time.
//!
//! # Ownership and Borrowing Considerations
//!
//! - A write takes the sink by value and returns it once everything is flushed
//! - Pass `&mut buffer` instead of `buffer` to keep ownership of the destination
//! - If the write fails, the sink is dropped (files are closed) before the error is returned
//!
//! # Features
//!
//! - Header row with custom column names and order
//! - Custom delimiters and line terminators
//! - Quoting of values containing the delimiter, a quote or the line terminator
//! - Absent records written as empty rows, or skipped
//!
//! # Examples
//!
//! ## Writing records to a buffer
//!
//! ```
//! use record_csv::core::field::{CsvField, CsvRecord};
//! use record_csv::item::csv::csv_writer::CsvWriterBuilder;
//!
//! struct Person {
//!     name: String,
//!     age: u8,
//!     occupation: String,
//! }
//!
//! impl CsvRecord for Person {
//!     fn csv_fields() -> Vec<CsvField<Self>> {
//!         vec![
//!             CsvField::new("name", |p: &Person| p.name.clone()).order(1),
//!             CsvField::new("age", |p: &Person| p.age).order(2),
//!             CsvField::new("occupation", |p: &Person| p.occupation.clone()).order(3),
//!         ]
//!     }
//! }
//!
//! let people = vec![
//!     Person {
//!         name: "Alice".to_string(),
//!         age: 28,
//!         occupation: "Engineer, Backend".to_string(),
//!     },
//!     Person {
//!         name: "Bob".to_string(),
//!         age: 35,
//!         occupation: "Designer".to_string(),
//!     },
//! ];
//!
//! let writer = CsvWriterBuilder::new().line_terminator("\n").build().unwrap();
//!
//! let mut buffer = Vec::new();
//! writer.write::<Person, _>(&people, &mut buffer).unwrap();
//!
//! let csv_output = String::from_utf8(buffer).unwrap();
//! assert_eq!(
//!     csv_output,
//!     "name,age,occupation\nAlice,28,\"Engineer, Backend\"\nBob,35,Designer\n"
//! );
//! ```
//!
//! ## Writing a file
//!
//! ```no_run
//! use record_csv::core::field::{CsvField, CsvRecord};
//! use record_csv::item::csv::csv_writer::CsvWriterBuilder;
//!
//! struct Record {
//!     id: u32,
//!     value: String,
//! }
//!
//! impl CsvRecord for Record {
//!     fn csv_fields() -> Vec<CsvField<Self>> {
//!         vec![
//!             CsvField::new("id", |r: &Record| r.id),
//!             CsvField::new("value", |r: &Record| r.value.clone()),
//!         ]
//!     }
//! }
//!
//! let records = (1..=3).map(|id| Record { id, value: "x".repeat(id as usize) });
//!
//! let writer = CsvWriterBuilder::new().build().unwrap();
//! writer.write_to_path::<Record, _>(records, "output.csv").unwrap();
//! ```

/// Line encoding: delimiting, quoting and termination.
pub mod csv_encoder;

/// Record-level writer, its builder and its settings.
pub mod csv_writer;
