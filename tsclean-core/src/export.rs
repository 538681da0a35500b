//! Flat-file export: one line per sample with index, timestamp and value.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{ExportMode, Series, TsError};

/// Write one `"{index} \t {ts} \t {value}\n"` line per sample.
///
/// Timestamps are RFC 3339; missing values are written as `NaN`.
///
/// # Errors
/// Returns `TsError::Io` when the writer fails.
pub fn write_series<W: Write>(series: &Series, mut writer: W) -> Result<(), TsError> {
    for (i, s) in series.samples().iter().enumerate() {
        let value = s.measured().unwrap_or(f64::NAN);
        writeln!(writer, "{i} \t {} \t {value}", s.ts.to_rfc3339())?;
    }
    writer.flush()?;
    Ok(())
}

/// Create (or truncate) the file at `path` and write `series` into it.
///
/// Returns `Ok(true)` when the file was written. In `ExportMode::Lenient` a
/// destination that cannot be opened is skipped and `Ok(false)` is returned.
///
/// # Errors
/// Returns `TsError::Io` when writing fails, or when the destination cannot
/// be opened in `ExportMode::Strict`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        level = "debug",
        skip(series, path),
        fields(series = series.name(), path = %path.as_ref().display()),
        err
    )
)]
pub fn export_to_path(
    series: &Series,
    path: impl AsRef<Path>,
    mode: ExportMode,
) -> Result<bool, TsError> {
    let file = match File::create(path.as_ref()) {
        Ok(f) => f,
        Err(err) if mode == ExportMode::Lenient => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %err, "export destination unavailable; skipped");
            #[cfg(not(feature = "tracing"))]
            let _ = err;
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };
    write_series(series, BufWriter::new(file))?;
    Ok(true)
}
