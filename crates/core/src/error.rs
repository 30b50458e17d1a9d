use thiserror::Error;

/// Top-level error type used across the entire workspace.
#[derive(Debug, Error)]
pub enum PortalError {
    /// Channel text (or value) is not a valid instance of the channel's shape.
    #[error("cannot decode channel `{channel}`: {reason}")]
    Decode { channel: String, reason: String },

    /// A write named a channel the widget never declared.
    #[error("`{tag}` has no channel named `{channel}`")]
    UnknownChannel { tag: &'static str, channel: String },

    /// An interaction referred to a node that is no longer installed.
    #[error("interaction target `{node}` is no longer present")]
    StaleReference { node: String },

    #[error("unknown widget tag `{0}`")]
    UnknownTag(String),

    #[error("no element with id {0}")]
    UnknownElement(u64),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = PortalError> = std::result::Result<T, E>;
