/// CSV encoding of record sequences.
pub mod csv;
