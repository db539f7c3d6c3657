use serde::{Deserialize, Serialize};

use crate::entities::student;

/// Body of the add and edit student requests.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentInput {
    pub name: String,
    pub age: i32,
}

/// Full student view, including the assigned faculty if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentResponse {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub faculty_id: Option<i32>,
}

impl From<student::Model> for StudentResponse {
    fn from(model: student::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            age: model.age,
            faculty_id: model.faculty_id,
        }
    }
}

/// Read-only view used by the "last five" listing, without the faculty link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: i32,
    pub name: String,
    pub age: i32,
}

impl From<student::Model> for StudentSummary {
    fn from(model: student::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            age: model.age,
        }
    }
}
