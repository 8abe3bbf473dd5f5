/// Declaration of the fields a record type exposes as CSV columns.
pub mod field;

/// Resolved, ordered column layout per record type, and its process-wide cache.
pub mod plan;

/// Field values and their conversion to display strings.
pub mod value;
