//! KMZ packaging: a zip archive holding `doc.kml`.

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::Result;
use crate::kml::Placemark;

pub const KMZ_CONTENT_TYPE: &str = "application/vnd.google-earth.kmz";

/// Entry name Google Earth and most GIS tools look for first.
const KMZ_ENTRY: &str = "doc.kml";

/// Bundle the placemark into KMZ bytes.
pub fn to_kmz(placemark: &Placemark) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .compression_level(Some(6));

    zip.start_file(KMZ_ENTRY, options)?;
    zip.write_all(placemark.to_kml().as_bytes())?;
    zip.finish()?;

    Ok(buffer.into_inner())
}

/// Write the KMZ to `path`, going through a temporary sibling so a failed export
/// never leaves a truncated archive behind.
pub fn write_kmz(placemark: &Placemark, path: &Path) -> Result<()> {
    let bytes = to_kmz(placemark)?;
    let tmp = temp_sibling(path);

    if let Err(err) = fs::write(&tmp, &bytes).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(err.into());
    }

    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote KMZ export");
    Ok(())
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique per process and per call, so concurrent exports to one path never share a temp file.
fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "surface.kmz".into());
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    name.push(format!(".{}.{seq}.tmp", std::process::id()));
    path.with_file_name(name)
}
