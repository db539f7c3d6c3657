use serde::Deserialize;

/// Body of the add and update faculty requests.
#[derive(Debug, Clone, Deserialize)]
pub struct FacultyInput {
    pub name: String,
    pub color: String,
}
