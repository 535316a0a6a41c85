//! XML parsing utilities for workbook metadata calamine does not expose

use crate::error::Result;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::BufReader;
use zip::ZipArchive;

/// Extract the active sheet index (`activeTab` of the first `workbookView`)
/// from an XLSX archive. Missing attribute or element means sheet 0.
pub fn extract_active_tab_from_xlsx(
    archive: &mut ZipArchive<impl std::io::Read + std::io::Seek>,
) -> Result<usize> {
    // Try to read workbook.xml
    let workbook_xml = match archive.by_name("xl/workbook.xml") {
        Ok(file) => file,
        Err(_) => return Ok(0),
    };

    let buf_reader = BufReader::new(workbook_xml);
    let mut reader = Reader::from_reader(buf_reader);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"workbookView" => {
                for attr in e.attributes().flatten() {
                    if attr.key.local_name().as_ref() == b"activeTab" {
                        let value = String::from_utf8_lossy(&attr.value);
                        return Ok(value.trim().parse().unwrap_or(0));
                    }
                }
                // Only the first view counts
                return Ok(0);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(0)
}
