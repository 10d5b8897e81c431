use crate::common::Value;

use super::{Filter, FilterClause};

/// Creates a fluent filter builder for a top-level field.
///
/// ```rust
/// use waypoint::filter::field;
///
/// let filter = field("email").eq("a@b.com");
/// assert_eq!(filter.clauses().len(), 1);
/// ```
pub fn field(field_name: &str) -> FluentFilter {
    FluentFilter {
        field_name: field_name.to_string(),
    }
}

/// Creates a fluent builder for an array-membership condition: some element
/// of the `array` field has `subfield` equal to the given value.
///
/// ```rust
/// use waypoint::filter::{element, field};
///
/// let filter = field("user_email").eq("a@b.com").and(element("steps", "week").eq(3));
/// assert_eq!(filter.array_field(), Some("steps"));
/// ```
pub fn element(array: &str, subfield: &str) -> FluentElementFilter {
    FluentElementFilter {
        array: array.to_string(),
        subfield: subfield.to_string(),
    }
}

/// Filter builder bound to one top-level field.
pub struct FluentFilter {
    field_name: String,
}

impl FluentFilter {
    /// Matches documents where the field equals `value`.
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(vec![FilterClause::ByField {
            name: self.field_name,
            value: value.into(),
        }])
    }
}

/// Filter builder bound to one subfield of the elements of an array field.
pub struct FluentElementFilter {
    array: String,
    subfield: String,
}

impl FluentElementFilter {
    /// Matches documents with an array element whose subfield equals `value`.
    #[inline]
    pub fn eq<T: Into<Value>>(self, value: T) -> Filter {
        Filter::new(vec![FilterClause::ByArrayElementField {
            array: self.array,
            subfield: self.subfield,
            value: value.into(),
        }])
    }
}
