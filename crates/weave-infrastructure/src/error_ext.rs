//! Context helpers for foreign errors
//!
//! Registration modules, the bridge and the config loader all call into
//! code with its own error types. [`ErrorContext`] folds those into
//! [`weave_domain::Error`] with a message prefix, choosing the variant by
//! method:
//!
//! | Method | Variant |
//! |--------|---------|
//! | `context` / `with_context` | `Internal` |
//! | `module_context` | `Module` |
//! | `io_context` | `Io` (source kept) |
//! | `config_context` | `Configuration` (source kept) |

use std::fmt::Display;
use weave_domain::error::{Error, Result};

/// Map any `std::error::Error` result into a domain result
///
/// # Example
///
/// ```
/// use weave_infrastructure::di::Container;
/// use weave_infrastructure::error_ext::ErrorContext;
///
/// let container = Container::new().register_sync(0, |()| {
///     let port: u16 = "8080".parse().module_context("parsing port")?;
///     assert_eq!(port, 8080);
///     Ok(())
/// });
/// # drop(container);
/// ```
pub trait ErrorContext<T> {
    /// Prefix the error and turn it into `Internal`
    fn context<C: Display>(self, context: C) -> Result<T>;

    /// Like [`Self::context`], building the prefix only on failure
    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T>;

    /// Failure of a registration module
    fn module_context<C: Display>(self, context: C) -> Result<T>;

    /// Failure touching the filesystem or threads
    fn io_context<C: Display>(self, context: C) -> Result<T>;

    /// Failure reading or writing configuration
    fn config_context<C: Display>(self, context: C) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|err| Error::internal(prefixed(&context, &err)))
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|err| Error::internal(prefixed(&f(), &err)))
    }

    fn module_context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|err| Error::module(prefixed(&context, &err)))
    }

    fn io_context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|err| Error::io_with_source(prefixed(&context, &err), err))
    }

    fn config_context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|err| Error::configuration_with_source(prefixed(&context, &err), err))
    }
}

fn prefixed(context: &dyn Display, err: &dyn Display) -> String {
    format!("{context}: {err}")
}
