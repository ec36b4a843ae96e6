use settings_errors::catalog::{BAD_REQUEST, CONFLICT, INTERNAL, NOT_FOUND, VALIDATION};
use settings_errors::{Problem, ValidationViolation};

use crate::domain::error::DomainError;

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        let trace_id = tracing::Span::current()
            .id()
            .map(|id| id.into_u64().to_string());

        let mut problem = match e {
            DomainError::NotFound { message } => NOT_FOUND.as_problem(message),
            DomainError::Conflict { message } => CONFLICT.as_problem(message),
            DomainError::BadRequest { message } => BAD_REQUEST.as_problem(message),
            DomainError::Validation { field, message } => VALIDATION
                .as_problem(message.clone())
                .with_errors(vec![ValidationViolation {
                    field,
                    message,
                    code: None,
                }]),
            DomainError::Database(err) => {
                tracing::error!(error = ?err, "Database error occurred");
                INTERNAL.as_problem("An internal error occurred")
            }
        };

        if let Some(id) = trace_id {
            problem = problem.with_trace_id(id);
        }
        problem
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
