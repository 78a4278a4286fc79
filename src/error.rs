//! Error representations
use std::{backtrace::Backtrace, fmt::Display};

/// Error for the Base64 codec.
#[derive(Debug, thiserror::Error)]
pub struct EncodingError {
    kind: EncodingErrorKind,
    operation: &'static str,
    context: Box<EncodingContext>,
    backtrace: Option<Box<Backtrace>>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl EncodingError {
    pub fn new(kind: EncodingErrorKind, operation: &'static str) -> Self {
        Self {
            kind,
            operation,
            context: Default::default(),
            backtrace: Some(Box::new(std::backtrace::Backtrace::capture())),
            source: None,
        }
    }

    pub fn other(operation: &'static str, error: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Self::new(EncodingErrorKind::Other, operation).with_source(error)
    }

    pub fn with_position(mut self, value: u64) -> Self {
        self.context.position = Some(value);
        self
    }

    pub fn with_snippet<S: Into<String>>(mut self, value: S) -> Self {
        self.context.snippet = Some(value.into());
        self
    }

    pub fn with_backtrace(mut self, backtrace: Backtrace) -> Self {
        self.backtrace = Some(Box::new(backtrace));
        self
    }

    pub fn with_source<T: Into<Box<dyn std::error::Error + Send + Sync>>>(
        mut self,
        source: T,
    ) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> EncodingErrorKind {
        self.kind
    }

    /// Name of the operation that failed.
    pub fn operation(&self) -> &str {
        self.operation
    }

    /// Character index of the offending input, if known.
    pub fn position(&self) -> Option<u64> {
        self.context.position
    }

    pub fn snippet(&self) -> Option<&String> {
        self.context.snippet.as_ref()
    }
}

impl Display for EncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}{}", self.operation, self.kind, self.context)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum EncodingErrorKind {
    InvalidCharacter,
    InvalidBaseEncodedValue,
    Other,
}

impl Display for EncodingErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            Self::InvalidCharacter => "character outside of the Latin1 range",
            Self::InvalidBaseEncodedValue => "invalid base encoded value",
            Self::Other => "other",
        };

        f.write_str(value)
    }
}

#[derive(Debug, Default)]
struct EncodingContext {
    position: Option<u64>,
    snippet: Option<String>,
}

impl Display for EncodingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(position) = self.position {
            write!(f, " position {}", position)?;
        }

        if let Some(snippet) = &self.snippet {
            write!(f, " near '{}'", snippet)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let error =
            EncodingError::new(EncodingErrorKind::InvalidCharacter, "reqwire base64 encode")
                .with_position(3)
                .with_snippet("\u{0100}");

        assert_eq!(
            error.to_string(),
            "reqwire base64 encode: character outside of the Latin1 range position 3 near '\u{0100}'"
        );
        assert_eq!(error.kind(), EncodingErrorKind::InvalidCharacter);
        assert_eq!(error.operation(), "reqwire base64 encode");
    }

    #[test]
    fn test_display_no_context() {
        let error = EncodingError::new(EncodingErrorKind::Other, "op");

        assert_eq!(error.to_string(), "op: other");
        assert_eq!(error.position(), None);
        assert_eq!(error.snippet(), None);
    }
}
