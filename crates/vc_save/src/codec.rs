use serde_core::Serialize;
use serde_json::Value;
use serde_json::ser::{CompactFormatter, PrettyFormatter, Serializer};

/// Converts node trees to and from JSON text.
///
/// # Examples
///
/// ```
/// use vc_save::TextCodec;
///
/// let node = serde_json::json!({ "a": [1, 2] });
///
/// assert_eq!(TextCodec::compact().encode(&node).unwrap(), r#"{"a":[1,2]}"#);
/// assert_eq!(
///     TextCodec::pretty(2).encode(&node).unwrap(),
///     "{\n  \"a\": [\n    1,\n    2\n  ]\n}",
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCodec {
    pretty: bool,
    indent: usize,
}

impl Default for TextCodec {
    /// Pretty printed with an indent of 2 spaces.
    fn default() -> Self {
        Self::pretty(2)
    }
}

impl TextCodec {
    /// Multi-line output, nested nodes indented by `indent` spaces.
    #[inline]
    pub const fn pretty(indent: usize) -> Self {
        Self {
            pretty: true,
            indent,
        }
    }

    /// Single-line output.
    #[inline]
    pub const fn compact() -> Self {
        Self {
            pretty: false,
            indent: 0,
        }
    }

    #[inline]
    pub const fn is_pretty(&self) -> bool {
        self.pretty
    }

    #[inline]
    pub const fn indent(&self) -> usize {
        self.indent
    }

    pub fn encode(&self, node: &Value) -> Result<String, serde_json::Error> {
        let mut buf = Vec::with_capacity(128);

        if self.pretty {
            let indent = vec![b' '; self.indent];
            let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
            node.serialize(&mut ser)?;
        } else {
            let mut ser = Serializer::with_formatter(&mut buf, CompactFormatter);
            node.serialize(&mut ser)?;
        }

        // The serializer only emits valid UTF-8.
        String::from_utf8(buf).map_err(|err| serde_json::Error::io(std::io::Error::other(err)))
    }

    #[inline]
    pub fn decode(&self, text: &str) -> Result<Value, serde_json::Error> {
        serde_json::from_str(text)
    }
}
