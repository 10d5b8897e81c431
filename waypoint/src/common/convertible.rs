use crate::collection::Document;
use crate::common::Value;
use crate::errors::{ErrorKind, WaypointError, WaypointResult};

/// Conversion between a typed value and its [Value] representation.
///
/// Typed records (users, roadmaps) implement this so application code never
/// handles raw documents; the store only ever sees [Value]s.
pub trait Convertible {
    type Output;

    fn to_value(&self) -> WaypointResult<Value>;
    fn from_value(value: &Value) -> WaypointResult<Self::Output>;
}

fn mismatch(expected: &str, value: &Value) -> WaypointError {
    log::error!("Value {} is not a {}", value, expected);
    WaypointError::new(
        &format!("Value of type {} is not a {}", value.type_name(), expected),
        ErrorKind::ObjectMappingError,
    )
}

impl Convertible for bool {
    type Output = bool;

    fn to_value(&self) -> WaypointResult<Value> {
        Ok(Value::Bool(*self))
    }

    fn from_value(value: &Value) -> WaypointResult<Self> {
        value.as_bool().copied().ok_or_else(|| mismatch("bool", value))
    }
}

impl Convertible for i64 {
    type Output = i64;

    fn to_value(&self) -> WaypointResult<Value> {
        Ok(Value::I64(*self))
    }

    fn from_value(value: &Value) -> WaypointResult<Self> {
        value.as_integer().ok_or_else(|| mismatch("integer", value))
    }
}

impl Convertible for u32 {
    type Output = u32;

    fn to_value(&self) -> WaypointResult<Value> {
        Ok(Value::I64(*self as i64))
    }

    fn from_value(value: &Value) -> WaypointResult<Self> {
        value
            .as_integer()
            .and_then(|i| u32::try_from(i).ok())
            .ok_or_else(|| mismatch("u32", value))
    }
}

impl Convertible for String {
    type Output = String;

    fn to_value(&self) -> WaypointResult<Value> {
        Ok(Value::String(self.clone()))
    }

    fn from_value(value: &Value) -> WaypointResult<Self> {
        value.as_string().cloned().ok_or_else(|| mismatch("string", value))
    }
}

impl Convertible for Document {
    type Output = Document;

    fn to_value(&self) -> WaypointResult<Value> {
        Ok(Value::Document(self.clone()))
    }

    fn from_value(value: &Value) -> WaypointResult<Self> {
        value.as_document().cloned().ok_or_else(|| mismatch("document", value))
    }
}

impl<T> Convertible for Option<T>
where
    T: Convertible,
{
    type Output = Option<T::Output>;

    fn to_value(&self) -> WaypointResult<Value> {
        match self {
            Some(v) => v.to_value(),
            None => Ok(Value::Null),
        }
    }

    fn from_value(value: &Value) -> WaypointResult<Self::Output> {
        match value {
            Value::Null => Ok(None),
            _ => Ok(Some(T::from_value(value)?)),
        }
    }
}

impl<T> Convertible for Vec<T>
where
    T: Convertible,
{
    type Output = Vec<T::Output>;

    fn to_value(&self) -> WaypointResult<Value> {
        let mut arr = Vec::with_capacity(self.len());
        for item in self {
            arr.push(item.to_value()?);
        }
        Ok(Value::Array(arr))
    }

    fn from_value(value: &Value) -> WaypointResult<Self::Output> {
        let items = value.as_array().ok_or_else(|| mismatch("array", value))?;
        items.iter().map(T::from_value).collect()
    }
}

/// Reads a field of `document` as `T`. A missing field reads as [Value::Null].
pub fn read_field<T: Convertible>(document: &Document, field: &str) -> WaypointResult<T::Output> {
    T::from_value(document.get(field).unwrap_or(&Value::Null)).map_err(|e| {
        WaypointError::new_with_cause(
            &format!("Invalid value for field '{}'", field),
            ErrorKind::ObjectMappingError,
            e,
        )
    })
}

/// Converts a record to the [Document] it is stored as.
pub fn to_document<T: Convertible>(record: &T) -> WaypointResult<Document> {
    match record.to_value()? {
        Value::Document(doc) => Ok(doc),
        other => Err(mismatch("document", &other)),
    }
}

/// Converts a stored [Document] back to its typed record.
pub fn from_document<T: Convertible>(document: &Document) -> WaypointResult<T::Output> {
    T::from_value(&Value::Document(document.clone()))
}
