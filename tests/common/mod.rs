#![allow(dead_code)]

mod mocks;

use std::{env::temp_dir, path::PathBuf};

pub use mocks::MockSink;

use rand::distr::{Alphanumeric, SampleString};
use record_csv::core::field::{CsvField, CsvRecord};

/// Random path under the system temp directory.
pub fn temp_csv_path() -> PathBuf {
    let file_name = Alphanumeric.sample_string(&mut rand::rng(), 16);
    temp_dir().join(format!("{}.csv", file_name))
}

pub struct TestClass {
    pub field1: Option<String>,
    pub field2: i32,
}

impl TestClass {
    pub fn new(field1: Option<&str>, field2: i32) -> Self {
        Self {
            field1: field1.map(str::to_string),
            field2,
        }
    }
}

impl CsvRecord for TestClass {
    fn csv_fields() -> Vec<CsvField<Self>> {
        vec![
            CsvField::new("field1", |r: &TestClass| r.field1.clone())
                .order(2)
                .name("String"),
            CsvField::new("field2", |r: &TestClass| r.field2)
                .order(1)
                .name("int"),
        ]
    }
}

pub fn test_values() -> Vec<Option<TestClass>> {
    vec![
        Some(TestClass::new(Some("s1"), 1)),
        Some(TestClass::new(None, 2)),
        None,
    ]
}
