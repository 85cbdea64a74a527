//! Success/failure wrapper with explicit catching boundaries.
//!
//! Only [`Outcome::run_catching`], [`Outcome::map_catching`] and
//! [`Outcome::recover_catching`] turn a raised failure (an `Err` returned by
//! the closure, or a panic inside it) into [`Outcome::Failure`]. Every other
//! combinator lets panics unwind through it untouched.

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Encapsulated failure. Cheap to clone; clones compare equal.
#[derive(Debug, Clone)]
pub enum Failure {
    Error(Arc<dyn Error + Send + Sync>),
    Panic(Arc<str>),
}

impl Failure {
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Failure::Error(Arc::new(error))
    }

    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        match self {
            Failure::Error(e) => e.downcast_ref::<E>(),
            Failure::Panic(_) => None,
        }
    }

    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Failure::Panic(message.into())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Error(e) => write!(f, "{e}"),
            Failure::Panic(msg) => write!(f, "panicked: {msg}"),
        }
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Failure::Error(e) => e.source(),
            Failure::Panic(_) => None,
        }
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Failure::Error(a), Failure::Error(b)) => Arc::ptr_eq(a, b),
            (Failure::Panic(a), Failure::Panic(b)) => a == b,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure(Failure),
}

/// Runs `block`, converting both `Err` and panics into a [`Failure`].
fn catching<T, E, F>(block: F) -> Outcome<T>
where
    E: Error + Send + Sync + 'static,
    F: FnOnce() -> Result<T, E>,
{
    match panic::catch_unwind(AssertUnwindSafe(block)) {
        Ok(Ok(value)) => Outcome::Success(value),
        Ok(Err(error)) => Outcome::Failure(Failure::new(error)),
        Err(payload) => Outcome::Failure(Failure::from_panic(payload)),
    }
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Outcome::Success(value)
    }

    pub fn failure(failure: Failure) -> Self {
        Outcome::Failure(failure)
    }

    pub fn run_catching<E, F>(block: F) -> Self
    where
        E: Error + Send + Sync + 'static,
        F: FnOnce() -> Result<T, E>,
    {
        catching(block)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    pub fn get_or_null(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn exception_or_null(&self) -> Option<&Failure> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }

    pub fn map<U, F>(self, transform: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(transform(value)),
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }

    pub fn map_catching<U, E, F>(self, transform: F) -> Outcome<U>
    where
        E: Error + Send + Sync + 'static,
        F: FnOnce(T) -> Result<U, E>,
    {
        match self {
            Outcome::Success(value) => catching(|| transform(value)),
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }

    pub fn recover<F>(self, transform: F) -> Outcome<T>
    where
        F: FnOnce(Failure) -> T,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(failure) => Outcome::Success(transform(failure)),
        }
    }

    pub fn recover_catching<E, F>(self, transform: F) -> Outcome<T>
    where
        E: Error + Send + Sync + 'static,
        F: FnOnce(Failure) -> Result<T, E>,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(failure) => catching(|| transform(failure)),
        }
    }

    pub fn fold<R, S, F>(self, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(T) -> R,
        F: FnOnce(Failure) -> R,
    {
        match self {
            Outcome::Success(value) => on_success(value),
            Outcome::Failure(failure) => on_failure(failure),
        }
    }

    pub fn get_or_else<F>(self, on_failure: F) -> T
    where
        F: FnOnce(Failure) -> T,
    {
        self.fold(|value| value, on_failure)
    }

    pub fn get_or_default(self, default: T) -> T {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(_) => default,
        }
    }

    /// Re-raises the encapsulated failure through `?`.
    pub fn get_or_throw(self) -> Result<T, Failure> {
        self.into()
    }

    pub fn on_success<F>(self, action: F) -> Self
    where
        F: FnOnce(&T),
    {
        if let Outcome::Success(value) = &self {
            action(value);
        }
        self
    }

    pub fn on_failure<F>(self, action: F) -> Self
    where
        F: FnOnce(&Failure),
    {
        if let Outcome::Failure(failure) = &self {
            action(failure);
        }
        self
    }
}

impl<T> From<Outcome<T>> for Result<T, Failure> {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => Err(failure),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T>
where
    E: Error + Send + Sync + 'static,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(error) => Outcome::Failure(Failure::new(error)),
        }
    }
}
