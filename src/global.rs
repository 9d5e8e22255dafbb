//! Process-wide facade over [`Binding::global`].
//!
//! Convenient for applications that want free functions instead of passing
//! a dispatcher around. Every emitter here panics if [`init`] has not
//! completed; use [`dispatcher`] to handle that case explicitly.

use crate::config::DispatcherOptions;
use crate::dispatcher::{Binding, LogDispatcher};
use crate::domain::DispatchError;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;

/// Binds the process-wide dispatcher. Succeeds once per process.
pub async fn init(options: DispatcherOptions) -> Result<(), DispatchError> {
    Binding::global().initialize(options).await.map(|_| ())
}

pub fn dispatcher() -> Result<Arc<LogDispatcher>, DispatchError> {
    Binding::global().dispatcher()
}

pub async fn critical<I, S, D>(tags: I, message: impl Into<String>, data: Option<&D>)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    D: Serialize + ?Sized,
{
    Binding::global().require().critical(tags, message, data).await;
}

pub async fn debug<I, S, D>(tags: I, message: impl Into<String>, data: Option<&D>)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    D: Serialize + ?Sized,
{
    Binding::global().require().debug(tags, message, data).await;
}

pub async fn error<I, S, D>(tags: I, message: impl Into<String>, data: Option<&D>)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    D: Serialize + ?Sized,
{
    Binding::global().require().error(tags, message, data).await;
}

pub async fn info<I, S, D>(tags: I, message: impl Into<String>, data: Option<&D>)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    D: Serialize + ?Sized,
{
    Binding::global().require().info(tags, message, data).await;
}

pub async fn warning<I, S, D>(tags: I, message: impl Into<String>, data: Option<&D>)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    D: Serialize + ?Sized,
{
    Binding::global().require().warning(tags, message, data).await;
}

/// Logs a CRITICAL record and ends the process.
pub async fn fatal<I, S, D>(tags: I, message: impl Into<String>, data: Option<&D>) -> Infallible
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    D: Serialize + ?Sized,
{
    Binding::global().require().fatal(tags, message, data).await
}
