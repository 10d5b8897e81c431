use crate::collection::Document;
use crate::common::{
    read_field, Convertible, Value, DOC_ID, USER_EMAIL, USER_HASHED_PASSWORD, USER_NAME,
};
use crate::errors::{ErrorKind, WaypointError, WaypointResult};

/// A registered account as stored in the `users` collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub hashed_password: String,
}

/// Registration input, before the password is hashed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    pub fn new(name: &str, email: &str, password: &str) -> Self {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

impl Convertible for User {
    type Output = User;

    fn to_value(&self) -> WaypointResult<Value> {
        let mut document = Document::new();
        document.put(DOC_ID, self.id.as_str())?;
        document.put(USER_NAME, self.name.as_str())?;
        document.put(USER_EMAIL, self.email.as_str())?;
        document.put(USER_HASHED_PASSWORD, self.hashed_password.as_str())?;
        Ok(Value::Document(document))
    }

    fn from_value(value: &Value) -> WaypointResult<Self::Output> {
        let document = value.as_document().ok_or_else(|| {
            log::error!("User must be stored as a document, found {}", value.type_name());
            WaypointError::new(
                &format!("User must be stored as a document, found {}", value.type_name()),
                ErrorKind::ObjectMappingError,
            )
        })?;

        Ok(User {
            // users written by other tools may lack an identifier
            id: read_field::<Option<String>>(document, DOC_ID)?.unwrap_or_default(),
            name: read_field::<String>(document, USER_NAME)?,
            email: read_field::<String>(document, USER_EMAIL)?,
            hashed_password: read_field::<String>(document, USER_HASHED_PASSWORD)?,
        })
    }
}
