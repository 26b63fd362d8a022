//! Returns an issued token to the caller, as JSON or as a redirect.

pub mod dispatch;
pub mod target;

pub use dispatch::{dispatch, redirect_url, Dispatch, Dispatcher};
pub use target::RedirectTarget;
