use std::time::Duration;

use crate::Channel;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("missing configuration: {}", .0.join(", "))]
    ConfigurationMissing(Vec<&'static str>),

    #[error("{channel} delivery timed out after {after:?}")]
    Timeout { channel: Channel, after: Duration },
}
