use crate::collection::Document;
use crate::common::Value;
use crate::errors::{ErrorKind, WaypointError, WaypointResult};
use crate::filter::Filter;
use itertools::Itertools;
use std::fmt::Display;

/// One `$set` assignment.
#[derive(Clone, Debug, PartialEq)]
pub enum SetOperation {
    /// Overwrites (or creates) a top-level field.
    SetField { name: String, value: Value },
    /// Overwrites (or creates) `leaf` on the array element selected by the
    /// filter's array-membership clause for `array`.
    SetArrayElementLeaf {
        array: String,
        leaf: String,
        value: Value,
    },
}

impl Display for SetOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetOperation::SetField { name, value } => write!(f, "{} = {}", name, value),
            SetOperation::SetArrayElementLeaf { array, leaf, value } => {
                write!(f, "{}.$.{} = {}", array, leaf, value)
            }
        }
    }
}

/// Sets a top-level field.
///
/// ```rust
/// use waypoint::update::set;
///
/// let update = set("role", "Engineer").and(set("salary_range", "100k"));
/// assert_eq!(update.operations().len(), 2);
/// ```
pub fn set<T: Into<Value>>(name: &str, value: T) -> Update {
    Update {
        operations: vec![SetOperation::SetField {
            name: name.to_string(),
            value: value.into(),
        }],
    }
}

/// Sets `leaf` on the array element of `array` selected by the filter.
pub fn set_element<T: Into<Value>>(array: &str, leaf: &str, value: T) -> Update {
    Update {
        operations: vec![SetOperation::SetArrayElementLeaf {
            array: array.to_string(),
            leaf: leaf.to_string(),
            value: value.into(),
        }],
    }
}

/// A `$set`-style update descriptor: an ordered list of assignments applied
/// to a single matched document.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Update {
    operations: Vec<SetOperation>,
}

impl Update {
    pub fn new(operations: Vec<SetOperation>) -> Self {
        Update { operations }
    }

    /// Appends the assignments of `other`.
    pub fn and(mut self, other: Update) -> Self {
        self.operations.extend(other.operations);
        self
    }

    pub fn operations(&self) -> &[SetOperation] {
        &self.operations
    }

    /// Checks the update against the filter it will be used with.
    ///
    /// An update must set something, names must be non-empty, and a
    /// positional assignment may only target the array named by the filter's
    /// array-membership clause. A positional assignment with a filter that has
    /// no such clause is accepted; it can never select an element and applies
    /// as a no-op.
    pub fn validate(&self, filter: &Filter) -> WaypointResult<()> {
        if self.operations.is_empty() {
            log::error!("Update for filter {} has no assignments", filter);
            return Err(WaypointError::new(
                "Update must contain at least one $set assignment",
                ErrorKind::MalformedInvocation,
            ));
        }

        let filter_array = filter.array_field();
        for operation in &self.operations {
            match operation {
                SetOperation::SetField { name, .. } if name.is_empty() => {
                    log::error!("Update {} has an empty field name", self);
                    return Err(WaypointError::new(
                        "Update field names cannot be empty",
                        ErrorKind::MalformedInvocation,
                    ));
                }
                SetOperation::SetArrayElementLeaf { array, leaf, .. } => {
                    if array.is_empty() || leaf.is_empty() {
                        log::error!("Update {} has an empty field name", self);
                        return Err(WaypointError::new(
                            "Update field names cannot be empty",
                            ErrorKind::MalformedInvocation,
                        ));
                    }
                    if let Some(selected) = filter_array {
                        if selected != array {
                            log::error!(
                                "Positional update on '{}' but filter selects elements of '{}'",
                                array,
                                selected
                            );
                            return Err(WaypointError::new(
                                &format!(
                                    "Positional update targets '{}' but the filter selects an element of '{}'",
                                    array, selected
                                ),
                                ErrorKind::MalformedInvocation,
                            ));
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Applies the assignments to a matched document in place.
    ///
    /// `element` is the array index selected by the filter, if any. Returns
    /// the modified count for the document: `1` when at least one leaf was
    /// written, `0` otherwise. A positional assignment without a selected
    /// element, or whose target element is missing or not a document, writes
    /// nothing.
    pub fn apply(&self, document: &mut Document, element: Option<usize>) -> WaypointResult<u64> {
        let mut written = false;
        for operation in &self.operations {
            match operation {
                SetOperation::SetField { name, value } => {
                    document.put(name.as_str(), value.clone())?;
                    written = true;
                }
                SetOperation::SetArrayElementLeaf { array, leaf, value } => {
                    let Some(index) = element else {
                        log::debug!("No element selected for positional update {}", operation);
                        continue;
                    };
                    let target = document
                        .get_mut(array)
                        .and_then(Value::as_array_mut)
                        .and_then(|items| items.get_mut(index))
                        .and_then(Value::as_document_mut);
                    match target {
                        Some(item) => {
                            item.put(leaf.as_str(), value.clone())?;
                            written = true;
                        }
                        None => {
                            log::debug!("Element {} of '{}' is not a document", index, array);
                        }
                    }
                }
            }
        }
        Ok(if written { 1 } else { 0 })
    }
}

impl Display for Update {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "$set {{{}}}", self.operations.iter().join(", "))
    }
}
