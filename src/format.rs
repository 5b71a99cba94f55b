//! Best-effort XML re-indentation for converter output.
//!
//! The renderer emits compact single-line bodies; this pass reflows them
//! with two-space indentation for human consumption. Formatting is
//! cosmetic and must never fail a conversion, so any parse problem
//! returns the input unchanged.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::Event;

use crate::error::Result;

/// Re-indent a rendered XML document, returning it unchanged if it
/// cannot be parsed.
pub fn indent(xml: &str) -> String {
    try_indent(xml).unwrap_or_else(|_| xml.to_string())
}

fn try_indent(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    loop {
        match reader.read_event()? {
            Event::Eof => break,
            event => writer.write_event(event)?,
        }
    }

    Ok(String::from_utf8(writer.into_inner())?)
}
