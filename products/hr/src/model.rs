use entity::employee;
use serde::{Deserialize, Serialize};

use crate::error::{HrError, HrResult};

/// Column widths of `first_name` / `last_name` in the `employee` table.
pub const MAX_NAME_LEN: usize = 128;
/// Column width of `email` in the `employee` table.
pub const MAX_EMAIL_LEN: usize = 320;

/// A stored employee row.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Employee fields without the store-assigned id. Any `id` in an incoming
/// payload is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewEmployee {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Trims every field and rejects blanks.
    pub fn validated(self) -> HrResult<Self> {
        Ok(Self {
            first_name: required("firstName", self.first_name, MAX_NAME_LEN)?,
            last_name: required("lastName", self.last_name, MAX_NAME_LEN)?,
            email: required("email", self.email, MAX_EMAIL_LEN)?,
        })
    }

    pub fn with_id(self, id: i32) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

impl Employee {
    pub fn validated(self) -> HrResult<Self> {
        let id = self.id;
        Ok(NewEmployee::from(self).validated()?.with_id(id))
    }
}

impl From<Employee> for NewEmployee {
    fn from(value: Employee) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
        }
    }
}

impl From<employee::Model> for Employee {
    fn from(value: employee::Model) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
        }
    }
}

fn required(field: &'static str, value: String, max_len: usize) -> HrResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(HrError::InvalidInput(format!("{field} must not be empty")));
    }
    // varchar(n) counts characters, not bytes.
    if trimmed.chars().count() > max_len {
        return Err(HrError::InvalidInput(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(trimmed.to_string())
}
