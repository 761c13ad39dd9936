//! Result files: the final body listing and the append-only timing log.
//!
//! Both writers are generic over `W: Write` so tests can render into a
//! `Vec<u8>`; the `*_to_path` wrappers open the real files.

use std::error::Error;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use nbody_core::Body;

/// Column header written before the first body line.
pub const BODY_HEADER: &str = "Body   :     x              y               z           |           vx              vy              vz   ";

/// Failure while writing a result file.
#[derive(Debug)]
pub struct OutputError {
    path: PathBuf,
    source: io::Error,
}

impl OutputError {
    fn new(path: &Path, source: io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The file that could not be written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot write {}: {}", self.path.display(), self.source)
    }
}

impl Error for OutputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// One line of the timing log.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingRecord {
    /// Cohort size.
    pub workers: usize,
    /// Body count.
    pub bodies: usize,
    /// Rounds executed.
    pub cycles: u64,
    /// Wall-clock time of the timed region.
    pub elapsed: Duration,
}

impl fmt::Display for TimingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "With {} workers, {} bodies and {} cycles the execution time is {:.6}s",
            self.workers,
            self.bodies,
            self.cycles,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Render the header and one 1-based line per body.
pub fn write_bodies<W: Write>(out: &mut W, bodies: &[Body]) -> io::Result<()> {
    writeln!(out, "{BODY_HEADER}")?;
    for (i, b) in bodies.iter().enumerate() {
        writeln!(
            out,
            "Body {} : {:.6}\t{:.6}\t{:.6}\t|\t{:.6}\t{:.6}\t{:.6}",
            i + 1,
            b.x,
            b.y,
            b.z,
            b.vx,
            b.vy,
            b.vz
        )?;
    }
    Ok(())
}

/// Append a single timing line.
pub fn append_timing<W: Write>(out: &mut W, record: &TimingRecord) -> io::Result<()> {
    writeln!(out, "{record}")
}

/// Create (or truncate) `path` and write the body listing.
pub fn write_bodies_to_path(path: &Path, bodies: &[Body]) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|e| OutputError::new(path, e))?;
    let mut out = BufWriter::new(file);
    write_bodies(&mut out, bodies)
        .and_then(|()| out.flush())
        .map_err(|e| OutputError::new(path, e))?;
    log::info!("wrote {} bodies to {}", bodies.len(), path.display());
    Ok(())
}

/// Append `record` to the log at `path`, creating it if needed.
pub fn append_timing_to_path(path: &Path, record: &TimingRecord) -> Result<(), OutputError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| OutputError::new(path, e))?;
    append_timing(&mut file, record).map_err(|e| OutputError::new(path, e))?;
    log::debug!("appended timing to {}", path.display());
    Ok(())
}
