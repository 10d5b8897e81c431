use crate::common::Value;
use crate::errors::{ErrorKind, WaypointError, WaypointResult};
use im::OrdMap;
use itertools::Itertools;
use std::borrow::Cow;
use std::fmt::{Debug, Display};

/// Represents a schema-less record stored in a collection.
///
/// A document is an open mapping from field name to [Value]. The store does
/// not enforce any schema; typed records are converted to and from documents
/// at the boundary (see [crate::common::Convertible]).
///
/// Field names are taken literally: `"steps.week"` is a single key, not a
/// path. Paths only exist in filter and update descriptors.
///
/// ## Lock-Free Design
///
/// The fields live in an `im::OrdMap`, so cloning a document (which every
/// read out of a collection does) shares structure instead of copying it.
#[derive(Clone, PartialEq, Default)]
pub struct Document {
    data: OrdMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: OrdMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of top-level fields.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates the specified [Value] with the specified key in this document,
    /// replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty.
    ///
    /// ```rust
    /// use waypoint::collection::Document;
    /// use waypoint::common::Value;
    ///
    /// let mut doc = Document::new();
    /// doc.put("email", "a@b.com").unwrap();
    /// assert_eq!(doc.get("email"), Some(&Value::from("a@b.com")));
    /// ```
    pub fn put<'a, T: Into<Value>>(
        &mut self,
        key: impl Into<Cow<'a, str>>,
        value: T,
    ) -> WaypointResult<()> {
        let key = key.into();
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(WaypointError::new(
                "Document does not support empty key",
                ErrorKind::InvalidDataType,
            ));
        }
        self.data = self.data.update(key.into_owned(), value.into());
        Ok(())
    }

    /// Returns the value of a top-level field, or `None` if absent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.data.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Removes a field, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    /// Field names in key order.
    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.data.iter().map(|(k, v)| format!("{}: {}", k, v)).join(", ")
        )
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Document {
            data: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Strips the quotes `stringify!` leaves around string-literal keys in [doc!].
#[doc(hidden)]
pub fn normalize(key: &str) -> String {
    key.trim_matches('"').to_string()
}

/// Builds a [Document] from a JSON-like literal.
///
/// Keys may be identifiers or string literals (use literals for keys such as
/// `"steps.week"` or `"$set"`). Values may be expressions, nested `{ }`
/// documents or `[ ]` arrays.
///
/// ```rust
/// use waypoint::doc;
///
/// let roadmap = doc! {
///     user_email: "a@b.com",
///     steps: [{ week: 1, completed: false }],
/// };
/// assert_eq!(roadmap.size(), 2);
/// ```
#[macro_export]
macro_rules! doc {
    () => {
        $crate::collection::Document::new()
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put($crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the doc! macro.
#[macro_export]
macro_rules! doc_value {
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
