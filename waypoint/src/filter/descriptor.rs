use crate::collection::Document;
use crate::common::{Value, PATH_SEPARATOR, POSITIONAL_OPERATOR};
use crate::errors::{ErrorKind, WaypointError, WaypointResult};

use super::{Filter, FilterClause};

fn malformed(message: &str) -> WaypointError {
    log::error!("{}", message);
    WaypointError::new(message, ErrorKind::MalformedInvocation)
}

fn is_operator_document(value: &Value) -> bool {
    value
        .as_document()
        .map(|doc| doc.fields().any(|k| k.starts_with('$')))
        .unwrap_or(false)
}

impl Filter {
    /// Converts a MongoDB-shaped filter document into a [Filter].
    ///
    /// `{"email": "a@b.com"}` becomes a plain clause and
    /// `{"steps.week": 3}` an array-membership clause. Query operators
    /// (`$gt`, `$in`, `$or`, ...), deeper paths and more than one
    /// array-membership entry are rejected with
    /// [ErrorKind::MalformedInvocation].
    ///
    /// ```rust
    /// use waypoint::doc;
    /// use waypoint::filter::Filter;
    ///
    /// let filter = Filter::from_document(&doc! { user_email: "a@b.com", "steps.week": 2 }).unwrap();
    /// assert_eq!(filter.array_field(), Some("steps"));
    /// ```
    pub fn from_document(descriptor: &Document) -> WaypointResult<Filter> {
        let mut clauses = Vec::with_capacity(descriptor.size());
        for (key, value) in descriptor.iter() {
            if key.starts_with('$') {
                return Err(malformed(&format!("Unsupported filter operator '{}'", key)));
            }
            if is_operator_document(value) {
                return Err(malformed(&format!(
                    "Unsupported query operator in filter entry '{}'",
                    key
                )));
            }

            let parts: Vec<&str> = key.split(PATH_SEPARATOR).collect();
            let clause = match parts.as_slice() {
                [name] => FilterClause::ByField {
                    name: name.to_string(),
                    value: value.clone(),
                },
                [array, subfield]
                    if !array.is_empty()
                        && !subfield.is_empty()
                        && *subfield != POSITIONAL_OPERATOR =>
                {
                    FilterClause::ByArrayElementField {
                        array: array.to_string(),
                        subfield: subfield.to_string(),
                        value: value.clone(),
                    }
                }
                _ => {
                    return Err(malformed(&format!("Unsupported filter path '{}'", key)));
                }
            };
            clauses.push(clause);
        }

        let filter = Filter::new(clauses);
        filter.validate()?;
        Ok(filter)
    }
}
