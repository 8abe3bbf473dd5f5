use std::fmt::{self, Display};

use super::value::{FieldValue, ToFieldValue};

/// Order given to fields that carry no explicit order hint.
///
/// Such fields sort after every field with a finite order. Among themselves they keep
/// declaration order, which callers should treat as implementation-defined.
pub const DEFAULT_ORDER: i32 = i32::MAX;

pub(crate) type FieldGetter<T> = Box<dyn Fn(&T) -> Result<FieldValue, String> + Send + Sync>;

/// A record type that can be written as CSV rows.
///
/// The type lists its fields once, in declaration order, together with the hints that
/// decide which fields become columns, where they appear and under which header name.
///
/// # Examples
///
/// ```
/// use record_csv::core::field::{CsvField, CsvRecord};
///
/// struct Car {
///     year: u16,
///     make: String,
///     internal_id: u64,
/// }
///
/// impl CsvRecord for Car {
///     fn csv_fields() -> Vec<CsvField<Self>> {
///         vec![
///             CsvField::new("year", |car: &Car| car.year).order(2),
///             CsvField::new("make", |car: &Car| car.make.clone()).order(1).name("Make"),
///             CsvField::new("internal_id", |car: &Car| car.internal_id).ignore(),
///         ]
///     }
/// }
/// ```
pub trait CsvRecord: Sized + 'static {
    fn csv_fields() -> Vec<CsvField<Self>>;
}

/// Declaration of one field of a record type.
pub struct CsvField<T> {
    ident: &'static str,
    order: i32,
    name: String,
    ignored: bool,
    getter: FieldGetter<T>,
}

impl<T> CsvField<T> {
    /// Declares a field whose value can always be read.
    pub fn new<F, V>(ident: &'static str, getter: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
        V: ToFieldValue,
    {
        Self::from_getter(ident, Box::new(move |record: &T| Ok(getter(record).to_field_value())))
    }

    /// Declares a field whose value may be unreadable, e.g. behind a lock or a
    /// fallible computation. An `Err` aborts the write that reads it.
    ///
    /// ```
    /// use record_csv::core::field::CsvField;
    /// use std::sync::Mutex;
    ///
    /// struct Counter {
    ///     hits: Mutex<u64>,
    /// }
    ///
    /// let field = CsvField::try_new("hits", |counter: &Counter| {
    ///     counter.hits.lock().map(|hits| *hits).map_err(|e| e.to_string())
    /// });
    /// assert_eq!(field.ident(), "hits");
    /// ```
    pub fn try_new<F, V, E>(ident: &'static str, getter: F) -> Self
    where
        F: Fn(&T) -> Result<V, E> + Send + Sync + 'static,
        V: ToFieldValue,
        E: Display,
    {
        Self::from_getter(
            ident,
            Box::new(move |record: &T| match getter(record) {
                Ok(value) => Ok(value.to_field_value()),
                Err(error) => Err(error.to_string()),
            }),
        )
    }

    fn from_getter(ident: &'static str, getter: FieldGetter<T>) -> Self {
        Self {
            ident,
            order: DEFAULT_ORDER,
            name: String::new(),
            ignored: false,
            getter,
        }
    }

    /// Sets the sort key of the column. Lower orders come first.
    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }

    /// Sets the header name of the column. An empty name keeps the field identifier.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Excludes the field from the CSV output.
    pub fn ignore(mut self) -> Self {
        self.ignored = true;
        self
    }

    pub fn ident(&self) -> &'static str {
        self.ident
    }

    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    /// Header name: the custom name when set, the field identifier otherwise.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.ident
        } else {
            &self.name
        }
    }

    pub(crate) fn into_parts(self) -> (i32, String, &'static str, FieldGetter<T>) {
        let name = self.display_name().to_owned();
        (self.order, name, self.ident, self.getter)
    }
}

impl<T> fmt::Debug for CsvField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CsvField")
            .field("ident", &self.ident)
            .field("order", &self.order)
            .field("name", &self.name)
            .field("ignored", &self.ignored)
            .finish_non_exhaustive()
    }
}
