use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt,
    sync::{Arc, OnceLock},
};

use log::debug;
use parking_lot::RwLock;

use crate::CsvError;

use super::{
    field::{CsvField, CsvRecord, FieldGetter},
    value::ValueFormatter,
};

/// One column of a [`FieldPlan`]: its sort key, header name and value getter.
pub struct FieldSpec<T> {
    order: i32,
    name: String,
    ident: &'static str,
    getter: FieldGetter<T>,
}

impl<T> FieldSpec<T> {
    pub fn order(&self) -> i32 {
        self.order
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// Reads and formats this column of `record`. An absent value becomes `""`.
    pub fn value_of(&self, record: &T) -> Result<String, CsvError> {
        let value = (self.getter)(record).map_err(|reason| CsvError::Access {
            field: self.ident.to_string(),
            reason,
        })?;
        Ok(ValueFormatter::format_value(&value).unwrap_or_default())
    }
}

impl<T> fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("order", &self.order)
            .field("name", &self.name)
            .field("ident", &self.ident)
            .finish_non_exhaustive()
    }
}

/// Ordered, immutable column layout of a record type.
///
/// Built once from the type's field declarations: ignored fields are dropped and the
/// rest are sorted by ascending order. The sort is stable, so fields sharing an order
/// keep their declaration order. Header names and row values are always produced in
/// this same order, which keeps every row aligned with the header.
///
/// # Examples
///
/// ```
/// use record_csv::core::field::{CsvField, CsvRecord};
/// use record_csv::core::plan::FieldPlan;
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
/// let plan = FieldPlan::<TestClass>::of();
/// assert_eq!(plan.field_names(), ["int", "String"]);
///
/// let record = TestClass { field1: None, field2: 2 };
/// assert_eq!(plan.field_values(&record).unwrap(), ["2", ""]);
/// ```
pub struct FieldPlan<T> {
    specs: Vec<FieldSpec<T>>,
    names: Vec<String>,
}

impl<T> FieldPlan<T> {
    /// Builds an uncached plan from explicit field declarations.
    pub fn build(fields: Vec<CsvField<T>>) -> Self {
        let mut specs: Vec<FieldSpec<T>> = fields
            .into_iter()
            .filter(|field| !field.is_ignored())
            .map(|field| {
                let (order, name, ident, getter) = field.into_parts();
                FieldSpec {
                    order,
                    name,
                    ident,
                    getter,
                }
            })
            .collect();

        // stable: equal orders keep declaration order
        specs.sort_by_key(|spec| spec.order);

        let names = specs.iter().map(|spec| spec.name.clone()).collect();

        Self { specs, names }
    }

    /// Header names, in column order.
    pub fn field_names(&self) -> &[String] {
        &self.names
    }

    /// Formatted values of `record`, in column order.
    ///
    /// Fails with [`CsvError::Access`] on the first field that cannot be read.
    pub fn field_values(&self, record: &T) -> Result<Vec<String>, CsvError> {
        self.specs.iter().map(|spec| spec.value_of(record)).collect()
    }

    /// A row of empty strings with one entry per column.
    pub fn empty_row(&self) -> Vec<String> {
        vec![String::new(); self.specs.len()]
    }

    pub fn specs(&self) -> &[FieldSpec<T>] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<T: CsvRecord> FieldPlan<T> {
    /// Returns the shared plan of `T`, building it on first use.
    ///
    /// Plans are cached process-wide by type. Under concurrent first use several
    /// threads may build a plan, but only the first one committed is kept and every
    /// caller receives that same instance.
    pub fn of() -> Arc<FieldPlan<T>> {
        let key = TypeId::of::<T>();

        let cached = plan_cache().read().get(&key).cloned();
        if let Some(plan) = cached.and_then(|plan| plan.downcast::<FieldPlan<T>>().ok()) {
            return plan;
        }

        let built = Arc::new(FieldPlan::build(T::csv_fields()));
        debug!(
            "Built CSV field plan for {} with {} column(s)",
            type_name::<T>(),
            built.len()
        );

        let committed = plan_cache()
            .write()
            .entry(key)
            .or_insert_with(|| built.clone() as Arc<dyn Any + Send + Sync>)
            .clone();

        committed.downcast::<FieldPlan<T>>().unwrap_or(built)
    }
}

impl<T> fmt::Debug for FieldPlan<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldPlan")
            .field("specs", &self.specs)
            .finish()
    }
}

type PlanCache = RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>;

fn plan_cache() -> &'static PlanCache {
    static PLANS: OnceLock<PlanCache> = OnceLock::new();
    PLANS.get_or_init(|| RwLock::new(HashMap::new()))
}
