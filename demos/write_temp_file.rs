use anyhow::Result;
use log::info;
use record_csv::{
    core::field::{CsvField, CsvRecord},
    item::csv::csv_writer::CsvWriterBuilder,
};

struct Temp {
    field1: String,
    field2: usize,
}

impl CsvRecord for Temp {
    fn csv_fields() -> Vec<CsvField<Self>> {
        vec![
            CsvField::new("field1", |t: &Temp| t.field1.clone())
                .order(2)
                .name("String field"),
            CsvField::new("field2", |t: &Temp| t.field2)
                .order(1)
                .name("int field"),
        ]
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let writer = CsvWriterBuilder::new()
        .delimiter(',')
        .line_terminator("\r\n")
        .include_header(true)
        .skip_null_records(true)
        .build()?;

    let file = tempfile::Builder::new().suffix(".csv").tempfile()?;

    let records = (1..=100).map(|i| Temp {
        field1: "a".repeat(i),
        field2: i,
    });

    writer.write_to_path::<Temp, _>(records, file.path())?;
    info!("CSV written to {}", file.path().display());

    let content = std::fs::read_to_string(file.path())?;
    for line in content.lines().take(4) {
        println!("{}", line);
    }
    println!("... {} lines in {}", content.lines().count(), file.path().display());

    // the temporary file is removed when `file` is dropped
    Ok(())
}
