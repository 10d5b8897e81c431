use crate::collection::Document;
use crate::common::Value;
use crate::errors::{ErrorKind, WaypointError, WaypointResult};
use itertools::Itertools;
use std::fmt::Display;

/// A single equality condition of a [Filter].
#[derive(Clone, Debug, PartialEq)]
pub enum FilterClause {
    /// `document[name] == value`
    ByField { name: String, value: Value },
    /// At least one element of `document[array]` is a document whose
    /// `subfield` equals `value`. The first such element is the one a
    /// positional update targets.
    ByArrayElementField {
        array: String,
        subfield: String,
        value: Value,
    },
}

impl Display for FilterClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterClause::ByField { name, value } => write!(f, "({} == {})", name, value),
            FilterClause::ByArrayElementField {
                array,
                subfield,
                value,
            } => write!(f, "({}[*].{} == {})", array, subfield, value),
        }
    }
}

/// Result of evaluating a [Filter] against one document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMatch {
    /// The document is excluded.
    NoMatch,
    /// The document matches. `element` is the index of the first array
    /// element satisfying the array-membership clause, or `None` when the
    /// filter has no such clause.
    Matched { element: Option<usize> },
}

impl FilterMatch {
    pub fn is_match(&self) -> bool {
        matches!(self, FilterMatch::Matched { .. })
    }

    pub fn element(&self) -> Option<usize> {
        match self {
            FilterMatch::Matched { element } => *element,
            FilterMatch::NoMatch => None,
        }
    }
}

/// A conjunction of equality clauses selecting documents (and, for one
/// array field, one element).
///
/// At most one [FilterClause::ByArrayElementField] clause is supported;
/// evaluating a filter with more fails with [ErrorKind::MalformedInvocation].
/// An empty filter matches every document.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Filter {
    clauses: Vec<FilterClause>,
}

impl Filter {
    /// Creates a filter from explicit clauses.
    pub fn new(clauses: Vec<FilterClause>) -> Self {
        Filter { clauses }
    }

    /// A filter matching every document.
    pub fn all() -> Self {
        Filter::default()
    }

    /// Combines two filters; a document must satisfy both.
    pub fn and(mut self, other: Filter) -> Self {
        self.clauses.extend(other.clauses);
        self
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_all(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The array-membership clause, if the filter has one.
    pub fn array_clause(&self) -> Option<&FilterClause> {
        self.clauses
            .iter()
            .find(|c| matches!(c, FilterClause::ByArrayElementField { .. }))
    }

    /// The array field named by the array-membership clause.
    pub fn array_field(&self) -> Option<&str> {
        match self.array_clause() {
            Some(FilterClause::ByArrayElementField { array, .. }) => Some(array),
            _ => None,
        }
    }

    /// Checks that the filter only uses supported shapes.
    pub fn validate(&self) -> WaypointResult<()> {
        for clause in &self.clauses {
            let names_empty = match clause {
                FilterClause::ByField { name, .. } => name.is_empty(),
                FilterClause::ByArrayElementField {
                    array, subfield, ..
                } => array.is_empty() || subfield.is_empty(),
            };
            if names_empty {
                log::error!("Filter {} has an empty field name", self);
                return Err(WaypointError::new(
                    "Filter field names cannot be empty",
                    ErrorKind::MalformedInvocation,
                ));
            }
        }

        let array_clauses = self
            .clauses
            .iter()
            .filter(|c| matches!(c, FilterClause::ByArrayElementField { .. }))
            .count();
        if array_clauses > 1 {
            log::error!("Filter {} has {} array-membership clauses", self, array_clauses);
            return Err(WaypointError::new(
                "A filter supports at most one array-membership clause",
                ErrorKind::MalformedInvocation,
            ));
        }
        Ok(())
    }

    /// Evaluates the filter against a document.
    ///
    /// Plain clauses require exact equality (a missing field compares as
    /// [Value::Null]). The array-membership clause scans the array in order
    /// and selects the first element whose subfield equals the value; if no
    /// element qualifies, the document does not match.
    pub fn apply(&self, document: &Document) -> WaypointResult<FilterMatch> {
        self.validate()?;

        let mut array_clause = None;
        for clause in &self.clauses {
            match clause {
                FilterClause::ByField { name, value } => {
                    if document.get(name).unwrap_or(&Value::Null) != value {
                        return Ok(FilterMatch::NoMatch);
                    }
                }
                FilterClause::ByArrayElementField { .. } => array_clause = Some(clause),
            }
        }

        let Some(FilterClause::ByArrayElementField {
            array,
            subfield,
            value,
        }) = array_clause
        else {
            return Ok(FilterMatch::Matched { element: None });
        };

        let position = document
            .get(array)
            .and_then(|v| v.as_array())
            .and_then(|items| {
                items.iter().position(|item| {
                    item.as_document()
                        .map(|element| element.get(subfield).unwrap_or(&Value::Null) == value)
                        .unwrap_or(false)
                })
            });

        Ok(match position {
            Some(index) => FilterMatch::Matched {
                element: Some(index),
            },
            None => FilterMatch::NoMatch,
        })
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.clauses.is_empty() {
            write!(f, "AllFilter")
        } else {
            write!(f, "{}", self.clauses.iter().join(" && "))
        }
    }
}
