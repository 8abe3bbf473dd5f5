#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # Record CSV

 Write collections of Rust records to CSV text. The set of columns, their order and their
 header names come from a per-type field declaration instead of an explicit schema.

 ## Core Concepts

- **CsvRecord:** A record type that lists its fields, each with an optional order, an
  optional custom header name, or an ignore marker.
- **FieldPlan:** The resolved, ordered columns of a record type. Built once per type and
  shared by every write of that type.
- **ValueFormatter:** Turns a field value into its display string. Collections render as
  `[a, b, c]`, maps as `{k=v}`, absent values as empty columns.
- **CsvEncoder:** Delimits, quotes and terminates one row and appends it to the sink.
- **CsvWriter:** Validated settings plus the write loop: header, one row per record,
  absent records written as empty rows or skipped.

 ## Features

| **Feature**   | **Description**                                               |
|---------------|---------------------------------------------------------------|
| chrono        | Formats `chrono` dates and times through their `Display` form |
| uuid          | Formats `uuid::Uuid` values in hyphenated form                |
| full          | Enables all available features                                |

 ## Getting Started

```rust
# use record_csv::{
#     CsvError,
#     core::field::{CsvField, CsvRecord},
#     item::csv::csv_writer::CsvWriterBuilder,
# };
struct Car {
    year: u16,
    make: String,
    model: String,
    tags: Vec<String>,
    vin: String,
}

impl CsvRecord for Car {
    fn csv_fields() -> Vec<CsvField<Self>> {
        vec![
            CsvField::new("year", |car: &Car| car.year).order(1),
            CsvField::new("make", |car: &Car| car.make.clone()).order(2).name("Make"),
            CsvField::new("model", |car: &Car| car.model.clone()).order(3).name("Model"),
            CsvField::new("tags", |car: &Car| car.tags.clone()),
            CsvField::new("vin", |car: &Car| car.vin.clone()).ignore(),
        ]
    }
}

fn main() -> Result<(), CsvError> {
    let cars = vec![
        Car {
            year: 1948,
            make: "Porsche".to_string(),
            model: "356".to_string(),
            tags: vec!["sports".to_string(), "classic".to_string()],
            vin: "WP0ZZZ".to_string(),
        },
        Car {
            year: 1967,
            make: "Ford".to_string(),
            model: "Mustang \"fastback\"".to_string(),
            tags: Vec::new(),
            vin: "1F0ZZZ".to_string(),
        },
    ];

    let writer = CsvWriterBuilder::new()
        .delimiter(',')
        .line_terminator("\n")
        .include_header(true)
        .build()?;

    let csv = writer.write_to_string::<Car>(&cars)?;

    assert_eq!(
        csv,
        "year,Make,Model,tags\n\
         1948,Porsche,356,\"[sports, classic]\"\n\
         1967,Ford,\"Mustang \"\"fastback\"\"\",[]\n"
    );

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.

 */

/// Field declarations, column plans and value formatting
pub mod core;

/// Error types for CSV writing
pub mod error;

#[doc(inline)]
pub use error::*;

/// Writers for record sequences (CSV)
pub mod item;
