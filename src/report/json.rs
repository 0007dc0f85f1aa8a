//! JSON export

use serde::Serialize;
use std::io::Write;

/// Pretty-printed JSON followed by a newline
pub fn write_json<W: Write, T: Serialize>(mut writer: W, value: &T) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer).map_err(serde_json::Error::io)
}
