//! Result output: a text report for every entry plus one JSON file per non empty region.
use crate::error::CliError;
use polyclip::{
    ops::{Operation, ResultEntry, ResultSink},
    polygon::SimplePolygon,
};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Writes a report of each entry to `out` and, when an output directory is set, the entry as
/// JSON to `<dir>/<Operation>Results/<operation>_<index>.json`.
pub struct ReportSink<W> {
    out: W,
    dir: Option<PathBuf>,
}

impl<W> ReportSink<W>
where
    W: Write,
{
    pub fn new(out: W, dir: Option<PathBuf>) -> Self {
        Self { out, dir }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_boundary(&mut self, label: &str, boundary: &SimplePolygon) -> Result<(), CliError> {
        write!(self.out, "  {}:", label)?;
        for v in boundary.vertexes() {
            write!(self.out, " ({}, {})", v.x, v.y)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn write_json(
        &mut self,
        dir: &Path,
        operation: Operation,
        index: usize,
        entry: &ResultEntry,
    ) -> Result<PathBuf, CliError> {
        let folder = dir.join(format!("{}Results", operation.label()));
        fs::create_dir_all(&folder)?;
        let path = folder.join(format!("{}_{}.json", operation.name(), index));
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, entry)?;
        writer.flush()?;
        Ok(path)
    }
}

impl<W> ResultSink<f64> for ReportSink<W>
where
    W: Write,
{
    type Error = CliError;

    fn accept(
        &mut self,
        operation: Operation,
        index: usize,
        entry: &ResultEntry,
    ) -> Result<(), Self::Error> {
        writeln!(self.out, "{} result {}:", operation.label(), index)?;
        if entry.is_empty() {
            match entry.sources.as_slice() {
                [i, j] => writeln!(self.out, "  no {} among polygons {} and {}", operation, i, j)?,
                _ => writeln!(self.out, "  {} result is empty", operation)?,
            }
            return Ok(());
        }

        self.write_boundary("outer", entry.region.outer())?;
        for (k, hole) in entry.region.holes().iter().enumerate() {
            self.write_boundary(&format!("hole {}", k), hole)?;
        }

        if let Some(dir) = self.dir.clone() {
            let path = self.write_json(&dir, operation, index, entry)?;
            writeln!(self.out, "  saved to {}", path.display())?;
            log::debug!("wrote {}", path.display());
        }

        Ok(())
    }
}
