//! Error types for the rank25 library.
//!
//! All errors are represented by the [`Rank25Error`] enum. Scoring itself
//! never fails: errors surface only at construction time or when a caller
//! supplies an argument outside the engine's contract.
//!
//! # Examples
//!
//! ```
//! use rank25::error::{Rank25Error, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(Rank25Error::invalid_input("corpus must not be empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for rank25 operations.
#[derive(Error, Debug)]
pub enum Rank25Error {
    /// Invalid input at engine construction (empty corpus, empty vocabulary)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A caller-supplied document id outside the corpus bounds
    #[error("Document id out of range: {0}")]
    OutOfRange(String),

    /// An argument outside an operation's contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for operations that may fail with [`Rank25Error`].
pub type Result<T> = std::result::Result<T, Rank25Error>;

impl Rank25Error {
    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Rank25Error::InvalidInput(msg.into())
    }

    /// Create a new out of range error.
    pub fn out_of_range<S: Into<String>>(msg: S) -> Self {
        Rank25Error::OutOfRange(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Rank25Error::InvalidArgument(msg.into())
    }
}
