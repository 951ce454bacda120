use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    SectionNotFound,
    SubsectionNotFound,
    TaskNotFound,
    AmbiguousRef,
    AlreadyCompleted,
    ValidationError,
    InvalidInput,
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::SectionNotFound => "SECTION_NOT_FOUND",
            Self::SubsectionNotFound => "SUBSECTION_NOT_FOUND",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::AmbiguousRef => "AMBIGUOUS_REF",
            Self::AlreadyCompleted => "ALREADY_COMPLETED",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidInput => "INVALID_INPUT",
            Self::DatabaseError => "DATABASE_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProdiflowError {
    pub code: ErrorCode,
    pub message: String,
}

impl ProdiflowError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            "prodiflow is not initialized. Run `prodiflow init` first.",
        )
    }

    pub fn section_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::SectionNotFound,
            format!("Section not found: {reference}"),
        )
    }

    pub fn subsection_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::SubsectionNotFound,
            format!("Subsection not found: {reference}"),
        )
    }

    pub fn task_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::TaskNotFound,
            format!("Task not found: {reference}"),
        )
    }

    pub fn ambiguous_ref(reference: &str, candidates: &[String]) -> Self {
        Self::new(
            ErrorCode::AmbiguousRef,
            format!(
                "Ambiguous reference '{}'. Candidates: {}",
                reference,
                candidates.join(", ")
            ),
        )
    }

    pub fn already_completed(task_id: &str) -> Self {
        Self::new(
            ErrorCode::AlreadyCompleted,
            format!("Task {task_id} is already completed"),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }
}

impl From<rusqlite::Error> for ProdiflowError {
    fn from(e: rusqlite::Error) -> Self {
        Self::database(e.to_string())
    }
}
