//! JSON export of extraction envelopes

use crate::error::Result;
use crate::model::ExtractionEnvelope;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Serialize the envelope as indented JSON
pub fn to_json_string(envelope: &ExtractionEnvelope) -> Result<String> {
    Ok(serde_json::to_string_pretty(envelope)?)
}

/// Write the envelope to `path`, replacing any existing file
pub fn write_envelope<P: AsRef<Path>>(path: P, envelope: &ExtractionEnvelope) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, envelope)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(
        path = %path.display(),
        routes = envelope.routes.len(),
        "wrote export"
    );
    Ok(())
}
