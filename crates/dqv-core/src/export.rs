use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use dqv_model::QualityReport;
use tracing::info;

use crate::error::{DqvError, Result};

/// Write `report` to `path` as indented JSON, creating parent directories.
pub fn export_report(report: &QualityReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| DqvError::WriteReport {
            path: path.to_path_buf(),
            source,
        })?;
    }
    let file = File::create(path).map_err(|source| DqvError::WriteReport {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;
    info!(path = %path.display(), "exported quality report");
    Ok(())
}
