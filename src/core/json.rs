//! JSON document formatting
//!
//! Both the build manifest and the plugin index are rewritten with sorted
//! object keys and 4-space indentation so diffs between releases stay small.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter};
use serde_json::Value;

use crate::config::defaults::JSON_INDENT;

/// Pretty printer that writes everything outside printable ASCII as `\uXXXX`
///
/// Existing index files were produced with ASCII-only escaping, so keeping
/// it avoids rewriting every non-ASCII description on the first release.
struct AsciiPrettyFormatter<'a>(PrettyFormatter<'a>);

impl Formatter for AsciiPrettyFormatter<'_> {
    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.0.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.0.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.0.end_object_value(writer)
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut start = 0;
        for (i, c) in fragment.char_indices() {
            if matches!(c, ' '..='~') {
                continue;
            }
            writer.write_all(&fragment.as_bytes()[start..i])?;
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units).iter() {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + c.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}

/// Serialize a JSON document with sorted keys and 4-space indentation
///
/// Key order comes from `serde_json::Map`, which is a sorted map as long as
/// the `preserve_order` feature stays off.
pub fn to_pretty_sorted(value: &Value) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = AsciiPrettyFormatter(PrettyFormatter::with_indent(JSON_INDENT));
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // Output is ASCII only
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_are_sorted() {
        let value = json!({"b": 1, "a": {"z": true, "m": null}});
        let text = to_pretty_sorted(&value).unwrap();

        let a = text.find("\"a\"").unwrap();
        let b = text.find("\"b\"").unwrap();
        let m = text.find("\"m\"").unwrap();
        let z = text.find("\"z\"").unwrap();
        assert!(a < b);
        assert!(m < z);
    }

    #[test]
    fn test_four_space_indent() {
        let value = json!({"AssemblyVersion": "1.2.3"});
        let text = to_pretty_sorted(&value).unwrap();
        assert_eq!(text, "{\n    \"AssemblyVersion\": \"1.2.3\"\n}");
    }

    #[test]
    fn test_array_of_objects_layout() {
        let value = json!([{"b": 2, "a": 1}]);
        let text = to_pretty_sorted(&value).unwrap();
        assert_eq!(
            text,
            "[\n    {\n        \"a\": 1,\n        \"b\": 2\n    }\n]"
        );
    }

    #[test]
    fn test_array_order_preserved() {
        let value = json!([3, 1, 2]);
        assert_eq!(to_pretty_sorted(&value).unwrap(), "[\n    3,\n    1,\n    2\n]");
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        let value = json!({"Description": "Triple Triad – Ærø 🃏"});
        let text = to_pretty_sorted(&value).unwrap();

        assert!(text.is_ascii());
        assert_eq!(
            text,
            "{\n    \"Description\": \"Triple Triad \\u2013 \\u00c6r\\u00f8 \\ud83c\\udccf\"\n}"
        );
        let reparsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed, value);
    }

    #[test]
    fn test_escapes_stay_single() {
        let value = json!({"Path": "C:\\bin\t\"x\""});
        let text = to_pretty_sorted(&value).unwrap();
        assert_eq!(text, "{\n    \"Path\": \"C:\\\\bin\\t\\\"x\\\"\"\n}");
    }
}
