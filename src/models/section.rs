use serde::{Deserialize, Serialize};

use super::Task;

/// A section holds direct tasks XOR subsections. The CLI enforces the
/// exclusivity on creation; the aggregation engine only reads whichever
/// container is populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub created_at: String,
    pub subsections: Vec<Subsection>,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subsection {
    pub id: String,
    pub section_id: String,
    pub title: String,
    pub created_at: String,
    pub tasks: Vec<Task>,
}
