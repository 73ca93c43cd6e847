//! Employee model.

use serde::{Deserialize, Serialize};

/// An employee who has logged in.
///
/// The id is what the employee typed; the name comes back from the remote
/// login and is what attendance rows and requests are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee ID as entered at login.
    pub id: String,
    /// Display name returned by the remote sheet.
    pub name: String,
}

impl Employee {
    /// Creates an employee.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
