use thiserror::Error;

// === DispatchError ===

/// Errors raised when handing a URL to the operating system.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The URL to dispatch was empty.
    #[error("Refusing to dispatch an empty URL")]
    EmptyUrl,
    /// The platform opener could not be started.
    #[error("Failed to open external URL {url}: {reason}")]
    Spawn { url: String, reason: String },
}

// === MessageError ===

/// Errors raised while parsing a page-to-host message.
#[derive(Debug, Error, PartialEq)]
pub enum MessageError {
    /// The payload is not JSON, or not one of the known message shapes.
    #[error("Malformed page message: {0}")]
    Malformed(String),
    /// The payload is a link message without a usable `url`.
    #[error("Page message has no url")]
    MissingUrl,
}

// === ConfigError ===

/// Errors related to the build-time shell configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configured origin is not an absolute URL.
    #[error("Invalid origin URL {url}: {reason}")]
    InvalidOrigin { url: String, reason: String },
    /// The configured origin uses a scheme other than http or https.
    #[error("Unsupported origin scheme: {0}")]
    UnsupportedScheme(String),
}

// === BackHandlerError ===

/// Errors related to hardware back-button subscriptions.
#[derive(Debug, Error, PartialEq)]
pub enum BackHandlerError {
    /// No handler with the given id is registered.
    #[error("Back handler not registered: {0}")]
    NotRegistered(u64),
}
