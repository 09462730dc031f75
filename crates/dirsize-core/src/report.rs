/// CSV export of scan results.
use crate::error::ReportError;
use crate::model::size::format_size;
use crate::model::DirectorySizeResult;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

const HEADER: [&str; 5] = ["name", "path", "size_bytes", "size", "file_count"];

/// Write `results` as CSV, one row per folder, in the order given.
pub fn write_csv<W: Write>(results: &[DirectorySizeResult], writer: W) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;
    for r in results {
        let path = r.full_path.to_string_lossy();
        let size_bytes = r.size_bytes.to_string();
        let size = format_size(r.size_bytes);
        let file_count = r.file_count.to_string();
        wtr.write_record([
            r.name.as_str(),
            &*path,
            size_bytes.as_str(),
            size.as_str(),
            file_count.as_str(),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// `dirsize-YYYYMMDD-HHMMSS.csv` for the given moment.
pub fn report_file_name(at: &DateTime<Local>) -> String {
    format!("dirsize-{}.csv", at.format("%Y%m%d-%H%M%S"))
}

/// Write a timestamped report into `dir` and return its path.
pub fn export_csv(results: &[DirectorySizeResult], dir: &Path) -> Result<PathBuf, ReportError> {
    let path = dir.join(report_file_name(&Local::now()));
    let file = File::create(&path).map_err(|source| io_error(&path, source))?;
    write_csv(results, io::BufWriter::new(file))?;
    info!("Exported {} rows to {}", results.len(), path.display());
    Ok(path)
}

fn io_error(path: &Path, source: io::Error) -> ReportError {
    ReportError::Io {
        path: path.to_path_buf(),
        source,
    }
}
