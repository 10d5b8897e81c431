use crate::collection::Document;
use crate::common::{PATH_SEPARATOR, POSITIONAL_OPERATOR, SET_OPERATOR};
use crate::errors::{ErrorKind, WaypointError, WaypointResult};

use super::{SetOperation, Update};

fn malformed(message: &str) -> WaypointError {
    log::error!("{}", message);
    WaypointError::new(message, ErrorKind::MalformedInvocation)
}

impl Update {
    /// Converts a MongoDB-shaped update document into an [Update].
    ///
    /// Only `$set` is recognised. Its targets are either a top-level field
    /// (`"role"`) or a positional path (`"steps.$.completed"`). Any other
    /// operator or path shape is rejected with
    /// [ErrorKind::MalformedInvocation].
    ///
    /// ```rust
    /// use waypoint::doc;
    /// use waypoint::update::{set_element, Update};
    ///
    /// let update = Update::from_document(&doc! { "$set": { "steps.$.completed": true } }).unwrap();
    /// assert_eq!(update, set_element("steps", "completed", true));
    /// ```
    pub fn from_document(descriptor: &Document) -> WaypointResult<Update> {
        let mut operations = Vec::new();
        for (key, value) in descriptor.iter() {
            if key != SET_OPERATOR {
                return Err(malformed(&format!("Unsupported update operator '{}'", key)));
            }
            let assignments = value
                .as_document()
                .ok_or_else(|| malformed("$set must map target paths to values"))?;

            for (target, value) in assignments.iter() {
                let parts: Vec<&str> = target.split(PATH_SEPARATOR).collect();
                let operation = match parts.as_slice() {
                    [name] if !name.starts_with('$') => SetOperation::SetField {
                        name: name.to_string(),
                        value: value.clone(),
                    },
                    [array, positional, leaf] if *positional == POSITIONAL_OPERATOR => {
                        SetOperation::SetArrayElementLeaf {
                            array: array.to_string(),
                            leaf: leaf.to_string(),
                            value: value.clone(),
                        }
                    }
                    _ => {
                        return Err(malformed(&format!("Unsupported $set target '{}'", target)));
                    }
                };
                operations.push(operation);
            }
        }

        if operations.is_empty() {
            return Err(malformed("Update must contain at least one $set assignment"));
        }
        Ok(Update::new(operations))
    }
}
