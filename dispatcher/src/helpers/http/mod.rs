//! Helpers for HTTP request path handling

pub mod request;

use log::trace;
use percent_encoding::percent_decode_str;

/// Represents data that has been percent decoded into UTF-8 text
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PercentDecoded {
    val: String,
}

impl PercentDecoded {
    /// Decodes data that has been provided in a percent encoded format.
    ///
    /// Byte sequences which are not valid UTF-8 once decoded are replaced with `U+FFFD`, so
    /// decoding never fails and a value is never rejected for its content.
    ///
    /// Unlike form decoding, a `+` is kept as-is rather than being turned into a space.
    pub fn new(raw: &str) -> Self {
        let val = percent_decode_str(raw).decode_utf8_lossy().into_owned();
        trace!(" percent_decode: {}, src: {}", val, raw);
        PercentDecoded { val }
    }

    /// Consumes the value, returning the decoded `String`.
    pub fn into_string(self) -> String {
        self.val
    }
}

impl AsRef<str> for PercentDecoded {
    fn as_ref(&self) -> &str {
        &self.val
    }
}
