//! Client side of the contact feature: form state, local validation and
//! submission to `POST /api/contact`.

mod client;
mod error;
mod form;
mod notifier;

pub use client::*;
pub use error::*;
pub use form::*;
pub use notifier::*;
