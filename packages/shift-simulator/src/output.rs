//! Output writers for simulation results.

use std::error::Error;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;

use crate::metrics::DayMetrics;
use crate::types::OutputFormat;

pub struct OutputWriter {
    writer: Box<dyn Write>,
    format: OutputFormat,
    /// `Json` output is written as one array when the run finishes.
    buffered: Vec<serde_json::Value>,
    path: PathBuf,
}

impl OutputWriter {
    pub fn new(
        output_dir: &str,
        format: &OutputFormat,
        compress: bool,
    ) -> Result<Self, Box<dyn Error>> {
        let dir = Path::new(output_dir);
        std::fs::create_dir_all(dir)?;

        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string())
            .replace(':', "-");
        let extension = match format {
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Json => "json",
        };
        let filename = format!("shift_{timestamp}.{extension}");

        let (writer, path): (Box<dyn Write>, PathBuf) = if compress {
            let gz_path = dir.join(format!("{filename}.gz"));
            let encoder = GzEncoder::new(File::create(&gz_path)?, Compression::default());
            (Box::new(BufWriter::new(encoder)), gz_path)
        } else {
            let path = dir.join(&filename);
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)?;
            (Box::new(BufWriter::new(file)), path)
        };

        Ok(Self {
            writer,
            format: format.clone(),
            buffered: Vec::new(),
            path,
        })
    }

    pub fn write_day(&mut self, metrics: &DayMetrics) -> Result<(), Box<dyn Error>> {
        match self.format {
            OutputFormat::Jsonl => {
                let json = serde_json::to_string(metrics)?;
                writeln!(self.writer, "{json}")?;
                self.writer.flush()?;
            }
            OutputFormat::Json => self.buffered.push(serde_json::to_value(metrics)?),
        }
        Ok(())
    }

    /// Flush everything; compressed output is finalized when the writer drops.
    pub fn finish(mut self) -> Result<PathBuf, Box<dyn Error>> {
        if matches!(self.format, OutputFormat::Json) {
            serde_json::to_writer_pretty(&mut self.writer, &self.buffered)?;
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(self.path)
    }
}
