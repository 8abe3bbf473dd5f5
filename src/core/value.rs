use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    fmt::{Debug, Display},
    rc::Rc,
    sync::Arc,
};

/// Raw value of a record field, before it is turned into column text.
///
/// Field getters produce a `FieldValue` (usually through [`ToFieldValue`]) and the
/// [`ValueFormatter`] renders it. Keeping the value structured until the last moment
/// is what lets sequences and maps render with their elements' own text.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// No value. Rendered as an absent string at the top level.
    Null,
    /// A value with a natural text form.
    Text(String),
    /// An ordered collection, rendered as `[a, b, c]`.
    Seq(Vec<FieldValue>),
    /// A key/value collection, rendered as `{k=v, k2=v2}`.
    Map(Vec<(FieldValue, FieldValue)>),
}

impl FieldValue {
    /// Wraps any `Display` value using its `to_string` form.
    ///
    /// ```
    /// use record_csv::core::value::FieldValue;
    /// use std::net::Ipv4Addr;
    ///
    /// let value = FieldValue::display(&Ipv4Addr::LOCALHOST);
    /// assert_eq!(value, FieldValue::Text("127.0.0.1".to_string()));
    /// ```
    pub fn display<D: Display + ?Sized>(value: &D) -> Self {
        FieldValue::Text(value.to_string())
    }

    /// Structural fallback for types with no natural text form: their `Debug` output.
    ///
    /// ```
    /// use record_csv::core::value::FieldValue;
    ///
    /// #[derive(Debug)]
    /// struct Inner {
    ///     field: &'static str,
    /// }
    ///
    /// let value = FieldValue::debug(&Inner { field: "Inner class" });
    /// assert_eq!(value, FieldValue::Text("Inner { field: \"Inner class\" }".to_string()));
    /// ```
    pub fn debug<D: Debug + ?Sized>(value: &D) -> Self {
        FieldValue::Text(format!("{:?}", value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    // Nested nulls have no column of their own to leave empty, so they render as "".
    fn render_into(&self, out: &mut String) {
        match self {
            FieldValue::Null => {}
            FieldValue::Text(text) => out.push_str(text),
            FieldValue::Seq(items) => {
                out.push('[');
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    item.render_into(out);
                }
                out.push(']');
            }
            FieldValue::Map(entries) => {
                out.push('{');
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    key.render_into(out);
                    out.push('=');
                    value.render_into(out);
                }
                out.push('}');
            }
        }
    }
}

/// Converts a field value into its canonical display string.
///
/// The formatter is total: it never fails and never invents a placeholder for a
/// missing value, it reports the absence and lets the caller decide.
///
/// # Examples
///
/// ```
/// use record_csv::core::value::ValueFormatter;
///
/// assert_eq!(ValueFormatter::format(&42), Some("42".to_string()));
/// assert_eq!(ValueFormatter::format(&vec!["a", "b", "c"]), Some("[a, b, c]".to_string()));
/// assert_eq!(ValueFormatter::format(&Vec::<u8>::new()), Some("[]".to_string()));
/// assert_eq!(ValueFormatter::format(&None::<String>), None);
/// ```
pub struct ValueFormatter;

impl ValueFormatter {
    pub fn format<V: ToFieldValue + ?Sized>(value: &V) -> Option<String> {
        Self::format_value(&value.to_field_value())
    }

    pub fn format_value(value: &FieldValue) -> Option<String> {
        match value {
            FieldValue::Null => None,
            FieldValue::Text(text) => Some(text.clone()),
            other => {
                let mut out = String::new();
                other.render_into(&mut out);
                Some(out)
            }
        }
    }
}

/// Conversion of a Rust value into a [`FieldValue`].
///
/// Implemented for the primitive types, strings, smart pointers, `Option` and the
/// standard collections. Implement it for your own types, or use
/// [`FieldValue::display`] / [`FieldValue::debug`] inside a field getter.
pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

macro_rules! display_field_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToFieldValue for $ty {
                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Text(self.to_string())
                }
            }
        )*
    };
}

display_field_value!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64
);

impl ToFieldValue for str {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.to_owned())
    }
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }
}

impl ToFieldValue for Cow<'_, str> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.to_string())
    }
}

impl ToFieldValue for FieldValue {
    fn to_field_value(&self) -> FieldValue {
        self.clone()
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(value) => value.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for &T {
    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for Box<T> {
    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for Rc<T> {
    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}

impl<T: ToFieldValue + ?Sized> ToFieldValue for Arc<T> {
    fn to_field_value(&self) -> FieldValue {
        (**self).to_field_value()
    }
}

impl<T: ToFieldValue> ToFieldValue for [T] {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Seq(self.iter().map(ToFieldValue::to_field_value).collect())
    }
}

impl<T: ToFieldValue, const N: usize> ToFieldValue for [T; N] {
    fn to_field_value(&self) -> FieldValue {
        self.as_slice().to_field_value()
    }
}

impl<T: ToFieldValue> ToFieldValue for Vec<T> {
    fn to_field_value(&self) -> FieldValue {
        self.as_slice().to_field_value()
    }
}

impl<T: ToFieldValue> ToFieldValue for VecDeque<T> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Seq(self.iter().map(ToFieldValue::to_field_value).collect())
    }
}

impl<T: ToFieldValue> ToFieldValue for BTreeSet<T> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Seq(self.iter().map(ToFieldValue::to_field_value).collect())
    }
}

impl<T: ToFieldValue, S> ToFieldValue for HashSet<T, S> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Seq(self.iter().map(ToFieldValue::to_field_value).collect())
    }
}

impl<K: ToFieldValue, V: ToFieldValue> ToFieldValue for BTreeMap<K, V> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Map(
            self.iter()
                .map(|(key, value)| (key.to_field_value(), value.to_field_value()))
                .collect(),
        )
    }
}

impl<K: ToFieldValue, V: ToFieldValue, S> ToFieldValue for HashMap<K, V, S> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Map(
            self.iter()
                .map(|(key, value)| (key.to_field_value(), value.to_field_value()))
                .collect(),
        )
    }
}

#[cfg(feature = "uuid")]
impl ToFieldValue for uuid::Uuid {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.hyphenated().to_string())
    }
}

#[cfg(feature = "chrono")]
display_field_value!(chrono::NaiveDate, chrono::NaiveTime, chrono::NaiveDateTime);

#[cfg(feature = "chrono")]
impl<Tz> ToFieldValue for chrono::DateTime<Tz>
where
    Tz: chrono::TimeZone,
    Tz::Offset: Display,
{
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

    use super::{FieldValue, ToFieldValue, ValueFormatter};

    #[derive(Debug)]
    #[allow(dead_code)]
    struct InnerClass {
        field: &'static str,
    }

    #[test]
    fn absent_values_stay_absent() {
        assert_eq!(ValueFormatter::format(&None::<i32>), None);
        assert_eq!(ValueFormatter::format_value(&FieldValue::Null), None);
        assert!(None::<&str>.to_field_value().is_null());
    }

    #[test]
    fn scalars_use_their_display_form() {
        assert_eq!(ValueFormatter::format("s1"), Some("s1".to_string()));
        assert_eq!(ValueFormatter::format(&-7i64), Some("-7".to_string()));
        assert_eq!(ValueFormatter::format(&2.5f64), Some("2.5".to_string()));
        assert_eq!(ValueFormatter::format(&true), Some("true".to_string()));
        assert_eq!(ValueFormatter::format(&'x'), Some("x".to_string()));
        assert_eq!(ValueFormatter::format(&Some(3u8)), Some("3".to_string()));
    }

    #[test]
    fn sequences_are_bracketed_and_comma_space_joined() {
        assert_eq!(
            ValueFormatter::format(&["array"]),
            Some("[array]".to_string())
        );
        assert_eq!(
            ValueFormatter::format(&vec![1, 2, 3]),
            Some("[1, 2, 3]".to_string())
        );
        assert_eq!(
            ValueFormatter::format(&VecDeque::from(vec!["a", "b"])),
            Some("[a, b]".to_string())
        );
        assert_eq!(
            ValueFormatter::format(&BTreeSet::from(["z", "y"])),
            Some("[y, z]".to_string())
        );
        assert_eq!(ValueFormatter::format(&Vec::<String>::new()), Some("[]".to_string()));
    }

    #[test]
    fn nested_sequences_recurse() {
        let nested = vec![vec![1, 2], vec![], vec![3]];
        assert_eq!(
            ValueFormatter::format(&nested),
            Some("[[1, 2], [], [3]]".to_string())
        );
    }

    #[test]
    fn nulls_inside_sequences_render_empty() {
        let values = vec![Some("a"), None, Some("c")];
        assert_eq!(ValueFormatter::format(&values), Some("[a, , c]".to_string()));
    }

    #[test]
    fn maps_render_key_equals_value() {
        let single = HashMap::from([("map", 1)]);
        assert_eq!(ValueFormatter::format(&single), Some("{map=1}".to_string()));

        let ordered = BTreeMap::from([("b", vec![2]), ("a", vec![1, 1])]);
        assert_eq!(
            ValueFormatter::format(&ordered),
            Some("{a=[1, 1], b=[2]}".to_string())
        );
    }

    #[test]
    fn fallbacks_use_display_or_debug() {
        let inner = InnerClass {
            field: "Inner class",
        };
        assert_eq!(
            ValueFormatter::format_value(&FieldValue::debug(&inner)),
            Some("InnerClass { field: \"Inner class\" }".to_string())
        );
        assert_eq!(
            ValueFormatter::format_value(&FieldValue::display("Inner class with Display")),
            Some("Inner class with Display".to_string())
        );
    }

    #[cfg(feature = "uuid")]
    #[test]
    fn uuids_use_hyphenated_form() {
        let id = uuid::Uuid::nil();
        assert_eq!(
            ValueFormatter::format(&id),
            Some("00000000-0000-0000-0000-000000000000".to_string())
        );
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn dates_use_iso_form() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 2, 29);
        assert_eq!(ValueFormatter::format(&date), Some("2024-02-29".to_string()));
    }
}
