//! Contact message fan-out: one submission, two notification channels
//! (Telegram chat and SMTP email) delivered concurrently.

mod channel;
mod dispatcher;
mod email;
mod error;
mod format;
mod outcome;
mod secrets;
mod telegram;
pub(crate) mod template;

pub use channel::*;
pub use dispatcher::*;
pub use email::*;
pub use error::*;
pub use format::*;
pub use outcome::*;
pub use secrets::*;
pub use telegram::*;
pub use template::ContactMail;
