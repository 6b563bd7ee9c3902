//! Secret redaction for logs and debug output.
//!
//! Private keys, the IPN shared secret and TronGrid API keys pass through
//! [`Redacted`] whenever they sit in a struct that derives or implements
//! `Debug`, or whenever they would otherwise reach a `tracing` field.

use std::fmt::{self, Debug, Display};

const REDACTED: &str = "<redacted>";

/// Wrapper that never prints its inner value.
///
/// ```
/// use ipn_rs::redact::Redacted;
///
/// let key = Redacted("0xac0974bec39a17e36ba4a6b4d238ff944bacb478");
/// assert_eq!(format!("{key:?}"), "<redacted>");
/// assert_eq!(key.expose(), &"0xac0974bec39a17e36ba4a6b4d238ff944bacb478");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Redacted<T>(pub T);

impl<T> Redacted<T> {
    /// Borrow the secret for the one place that actually needs it
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl<T> Debug for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> From<T> for Redacted<T> {
    fn from(value: T) -> Self {
        Redacted(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Credentials {
        user: &'static str,
        secret: Redacted<String>,
    }

    #[test]
    fn test_debug_and_display_hide_value() {
        let secret = Redacted("hunter2".to_string());
        assert_eq!(format!("{secret}"), "<redacted>");
        assert_eq!(format!("{secret:?}"), "<redacted>");
    }

    #[test]
    fn test_nested_debug_hides_value() {
        let creds = Credentials {
            user: "ipn",
            secret: "hunter2".to_string().into(),
        };
        let printed = format!("{creds:?}");
        assert!(printed.contains("ipn"));
        assert!(!printed.contains("hunter2"));
    }
}
