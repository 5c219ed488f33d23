use std::fmt;
use thiserror::Error as ThisError;

///
/// InvocationFault
///
/// Cycle-fatal failure of a component evaluation: the target function
/// raised, or the host refused a slot write. Never retried, never
/// swallowed; the owning cycle produces no output and the fault is
/// surfaced through the diagnostic sink. Nothing in this crate is
/// process-fatal.
///

#[derive(Clone, Debug, ThisError)]
#[error("{origin}:{class}: {message}")]
pub struct InvocationFault {
    pub class: FaultClass,
    pub origin: FaultOrigin,
    pub message: String,
}

impl InvocationFault {
    pub fn new(class: FaultClass, origin: FaultOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Fault raised by the invoked target function returning an error.
    pub fn target_error(message: impl Into<String>) -> Self {
        Self::new(FaultClass::Raised, FaultOrigin::Target, message)
    }

    /// Fault recovered from a panic in the invoked target function.
    #[must_use]
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "target function panicked".to_string()
        };

        Self::new(FaultClass::Raised, FaultOrigin::Target, message)
    }

    /// Fault raised when the host rejects an output write.
    pub fn output_rejected(slot: impl fmt::Display) -> Self {
        Self::new(
            FaultClass::HostRejected,
            FaultOrigin::Output,
            format!("host refused write to output slot '{slot}'"),
        )
    }

    /// Internal invariant violation inside the dispatcher itself.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(FaultClass::Internal, FaultOrigin::Dispatcher, message)
    }
}

///
/// FaultClass
/// Internal fault taxonomy for host-facing classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FaultClass {
    Raised,
    HostRejected,
    Internal,
}

impl fmt::Display for FaultClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Raised => "raised",
            Self::HostRejected => "host_rejected",
            Self::Internal => "internal",
        };
        write!(f, "{label}")
    }
}

///
/// FaultOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FaultOrigin {
    Target,
    Output,
    Dispatcher,
}

impl fmt::Display for FaultOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Target => "target",
            Self::Output => "output",
            Self::Dispatcher => "dispatcher",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
