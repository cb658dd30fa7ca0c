//! Service error types.

use std::fmt;

use intab_mutation::MutationError;
use intab_registry::RegistryError;
use intab_resolver::ResolveError;
use thiserror::Error;

use crate::request::RequestStage;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// The failure categories a caller can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or self-referential request. A caller bug; never retried.
    InvalidArgument,
    /// A ticket is malformed, unknown or expired. Re-acquire a fresh ticket.
    UnresolvableReference,
    /// The target is not a registered input table. Permanent for that handle.
    NotAnInputTable,
    /// The data table is structurally incompatible. Permanent until reconciled.
    SchemaMismatch,
    /// The data table could not be fully read. Nothing was applied; safe to retry.
    ReadFailure,
    /// The request was abandoned before the mutation started. Nothing was applied.
    Cancelled,
}

impl ErrorKind {
    /// Whether resending the identical request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::ReadFailure | ErrorKind::Cancelled)
    }

    /// The gRPC status name a transport should report.
    pub fn status_code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ErrorKind::UnresolvableReference => "FAILED_PRECONDITION",
            ErrorKind::NotAnInputTable => "INVALID_ARGUMENT",
            ErrorKind::SchemaMismatch => "INVALID_ARGUMENT",
            ErrorKind::ReadFailure => "UNAVAILABLE",
            ErrorKind::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Service errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request shape is invalid.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A ticket could not be resolved.
    #[error("could not resolve {field}: {source}")]
    Unresolvable {
        field: &'static str,
        #[source]
        source: ResolveError,
    },

    /// Registry error (not an input table, lock timeout).
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Mutation error (schema mismatch, read failure).
    #[error("mutation error: {0}")]
    Mutation(#[from] MutationError),

    /// The request was cancelled before execution began.
    #[error("request cancelled while {stage}")]
    Cancelled { stage: RequestStage },
}

impl ServiceError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn unresolvable(field: &'static str, source: ResolveError) -> Self {
        Self::Unresolvable { field, source }
    }

    pub fn cancelled(stage: RequestStage) -> Self {
        Self::Cancelled { stage }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            ServiceError::Unresolvable { .. } => ErrorKind::UnresolvableReference,
            ServiceError::Registry(RegistryError::NotAnInputTable { .. }) => {
                ErrorKind::NotAnInputTable
            }
            ServiceError::Registry(RegistryError::LockTimeout { .. }) => ErrorKind::Cancelled,
            ServiceError::Registry(_) => ErrorKind::InvalidArgument,
            ServiceError::Mutation(MutationError::SchemaMismatch { .. }) => {
                ErrorKind::SchemaMismatch
            }
            ServiceError::Mutation(MutationError::ReadFailure(_)) => ErrorKind::ReadFailure,
            ServiceError::Cancelled { .. } => ErrorKind::Cancelled,
        }
    }
}
