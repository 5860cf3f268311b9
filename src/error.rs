//! Error type shared by every stage of the codec.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuffmanError {
    /// Nothing to build a tree from, or a queue used outside its contract.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// A source byte has no entry in the code table.
    #[error("unknown symbol {byte:#04x} at position {position}")]
    UnknownSymbol { byte: u8, position: usize },

    /// The bit-string cannot be decoded against the tree.
    #[error("malformed stream at bit {position}: {message}")]
    MalformedStream { position: usize, message: String },

    /// A tree node breaks the leaf-or-two-children invariants.
    #[error("structural violation: {message}")]
    StructuralViolation { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HuffmanError {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn malformed_stream<S: Into<String>>(position: usize, message: S) -> Self {
        Self::MalformedStream {
            position,
            message: message.into(),
        }
    }

    pub fn structural_violation<S: Into<String>>(message: S) -> Self {
        Self::StructuralViolation {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_symbol_and_position() {
        let err = HuffmanError::UnknownSymbol {
            byte: b'z',
            position: 4,
        };
        assert_eq!(err.to_string(), "unknown symbol 0x7a at position 4");

        let err = HuffmanError::malformed_stream(7, "stream ended mid-code");
        assert_eq!(
            err.to_string(),
            "malformed stream at bit 7: stream ended mid-code"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: HuffmanError = io.into();
        assert!(matches!(err, HuffmanError::Io(_)));
    }
}
