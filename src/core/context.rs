//! Carrying a logger alongside request-scoped state
//!
//! This module provides:
//! - `Context`: an explicit value threaded through call signatures
//! - `scope` / `current`: a thread-local ambient logger with an RAII guard
//!
//! Asking either one for a logger that was never attached is an error
//! (`LoggerError::MissingLogger`), never a silent default.

use super::error::{LoggerError, Result};
use super::logger::Logger;
use std::cell::RefCell;
use std::marker::PhantomData;

/// Request-scoped values, currently just the logger.
#[derive(Debug, Clone, Default)]
pub struct Context {
    logger: Option<Logger>,
}

impl Context {
    /// An empty context with no logger attached.
    pub fn background() -> Self {
        Self::default()
    }

    /// A copy of this context carrying `logger`. The receiver is unchanged.
    #[must_use]
    pub fn with_logger(&self, logger: &Logger) -> Self {
        Self {
            logger: Some(logger.clone()),
        }
    }

    pub fn logger(&self) -> Result<&Logger> {
        self.logger.as_ref().ok_or(LoggerError::MissingLogger)
    }
}

/// Attach `logger` to a copy of `ctx`.
#[must_use]
pub fn to_context(ctx: &Context, logger: &Logger) -> Context {
    ctx.with_logger(logger)
}

/// The logger attached to `ctx`.
pub fn from_context(ctx: &Context) -> Result<&Logger> {
    ctx.logger()
}

thread_local! {
    static CURRENT: RefCell<Vec<Logger>> = const { RefCell::new(Vec::new()) };
}

/// Make `logger` the current logger of this thread until the guard drops.
///
/// Scopes nest; dropping the inner guard restores the outer logger.
/// Dropping an outer guard first also ends every scope opened inside it.
///
/// # Example
///
/// ```
/// use rust_leveled_logger::core::context;
/// use rust_leveled_logger::Logger;
///
/// let logger = Logger::new();
/// {
///     let _guard = context::scope(&logger);
///     assert!(context::current().unwrap().ptr_eq(&logger));
/// }
/// assert!(context::current().is_err());
/// ```
pub fn scope(logger: &Logger) -> ScopeGuard {
    let depth = CURRENT.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.push(logger.clone());
        stack.len() - 1
    });
    ScopeGuard {
        depth,
        _not_send: PhantomData,
    }
}

/// The innermost logger installed with [`scope`] on this thread.
pub fn current() -> Result<Logger> {
    CURRENT.with(|stack| stack.borrow().last().cloned().ok_or(LoggerError::MissingLogger))
}

/// RAII guard returned by [`scope`]
///
/// Tied to the thread that created it.
pub struct ScopeGuard {
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        CURRENT.with(|stack| stack.borrow_mut().truncate(self.depth));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_missing_logger_is_an_error() {
        let ctx = Context::background();
        assert!(matches!(ctx.logger(), Err(LoggerError::MissingLogger)));
        assert!(matches!(from_context(&ctx), Err(LoggerError::MissingLogger)));
    }

    #[test]
    fn test_attach_and_retrieve() {
        let logger = Logger::new().with_level(LogLevel::Trace);
        let background = Context::background();
        let ctx = to_context(&background, &logger);

        assert!(from_context(&ctx).unwrap().ptr_eq(&logger));
        assert!(background.logger().is_err());
    }

    #[test]
    fn test_nested_scopes() {
        assert!(current().is_err());

        let outer = Logger::new();
        let inner = outer.with_level(LogLevel::Debug);
        {
            let _outer_guard = scope(&outer);
            assert!(current().unwrap().ptr_eq(&outer));
            {
                let _inner_guard = scope(&inner);
                assert!(current().unwrap().ptr_eq(&inner));
            }
            assert!(current().unwrap().ptr_eq(&outer));
        }
        assert!(matches!(current(), Err(LoggerError::MissingLogger)));
    }

    #[test]
    fn test_outer_guard_dropped_first() {
        let outer = Logger::new();
        let inner = outer.with_level(LogLevel::Trace);

        let outer_guard = scope(&outer);
        let inner_guard = scope(&inner);
        drop(outer_guard);
        assert!(matches!(current(), Err(LoggerError::MissingLogger)));

        drop(inner_guard);
        assert!(current().is_err());

        let _again = scope(&inner);
        assert!(current().unwrap().ptr_eq(&inner));
    }

    #[test]
    fn test_scope_is_per_thread() {
        let logger = Logger::new();
        let _guard = scope(&logger);
        let other = std::thread::spawn(|| current().is_err()).join().unwrap();
        assert!(other);
    }
}
