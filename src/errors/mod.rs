use std::error::Error;
use std::fmt;

use derive_more::Display;

/// Error returned by the transport, the peer directory and node start-up.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BullyError {
    text: String,
    cause: String,
}

pub(crate) type Result<T> = std::result::Result<T, BullyError>;

/// Creates the Err result with the text and the cause.
pub fn new_err<T>(text: String, cause: String) -> std::result::Result<T, BullyError> {
    Err(BullyError { text, cause })
}

impl BullyError {
    /// Error message without the cause.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for BullyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cause_word = {
            if !self.cause.is_empty() {
                " Cause: ".to_string()
            } else {
                String::new()
            }
        };
        write!(f, "{}.{}{}", self.text, cause_word, self.cause)
    }
}

impl Error for BullyError {}

pub(crate) fn new_multiple_err<T>(text: String, causes: Vec<BullyError>) -> Result<T> {
    let mut error_string = String::new();

    if !causes.is_empty() {
        error_string.push_str("Errors: ");
    }

    for (idx, err) in causes.iter().enumerate() {
        error_string.push_str(&format!("{}) {} ", idx + 1, err));
    }
    Err(BullyError {
        text,
        cause: error_string.trim_end().to_string(),
    })
}

/// Reason for a message or an election event being dropped by the node. None of these
/// are failures: they are logged and the node carries on.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display)]
pub enum Discard {
    /// Epoch is older than the one the node already resolved.
    StaleMessage,

    /// Election requested while a round is active.
    DuplicateRound,

    /// Answer or round result for a round that is no longer active.
    NoMatchingRound,

    /// Event does not apply to the current node status.
    NotApplicable,
}
