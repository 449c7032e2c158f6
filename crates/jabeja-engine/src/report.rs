use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use jabeja_core::errors::JabejaError;

use crate::config::RunConfig;
use crate::metrics::RoundMetrics;

const REPORT_PREAMBLE: &str = "# Migration is number of nodes that have changed color.";
const CSV_DELIMITER: &str = ",";
const TEXT_DELIMITER: &str = "\t\t";

/// Destination for per-round metrics.
pub trait ReportSink {
    /// Records the metrics of one completed round.
    fn record(&mut self, metrics: &RoundMetrics) -> Result<(), JabejaError>;

    /// Flushes any buffered output once the run ends.
    fn finish(&mut self) -> Result<(), JabejaError> {
        Ok(())
    }
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn record(&mut self, metrics: &RoundMetrics) -> Result<(), JabejaError> {
        (**self).record(metrics)
    }

    fn finish(&mut self) -> Result<(), JabejaError> {
        (**self).finish()
    }
}

/// Keeps every recorded row in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    rows: Vec<RoundMetrics>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows recorded so far, in round order.
    pub fn rows(&self) -> &[RoundMetrics] {
        &self.rows
    }
}

impl ReportSink for MemorySink {
    fn record(&mut self, metrics: &RoundMetrics) -> Result<(), JabejaError> {
        self.rows.push(*metrics);
        Ok(())
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn record(&mut self, _metrics: &RoundMetrics) -> Result<(), JabejaError> {
        Ok(())
    }
}

struct DelimitedFile {
    path: PathBuf,
    delimiter: &'static str,
    writer: BufWriter<File>,
}

impl DelimitedFile {
    fn create(path: PathBuf, delimiter: &'static str) -> Result<Self, JabejaError> {
        let file = File::create(&path).map_err(|err| JabejaError::io("report-create", &path, err))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{REPORT_PREAMBLE}")
            .and_then(|_| writeln!(writer))
            .and_then(|_| {
                writeln!(
                    writer,
                    "Round{d}Edge-Cut{d}Swaps{d}Migrations",
                    d = delimiter
                )
            })
            .and_then(|_| writer.flush())
            .map_err(|err| JabejaError::io("report-write", &path, err))?;
        Ok(Self {
            path,
            delimiter,
            writer,
        })
    }

    fn append(&mut self, metrics: &RoundMetrics) -> Result<(), JabejaError> {
        let d = self.delimiter;
        writeln!(
            self.writer,
            "{}{d}{}{d}{}{d}{}",
            metrics.round, metrics.edge_cut, metrics.swaps, metrics.migrations
        )
        .and_then(|_| self.writer.flush())
        .map_err(|err| JabejaError::io("report-write", &self.path, err))
    }
}

/// Writes every round to a comma separated `.csv` file and a double-tab
/// separated `.txt` file side by side.
///
/// Rows are flushed as they are written, so a run that aborts part way leaves
/// the completed rounds on disk.
pub struct FileReportSink {
    csv: DelimitedFile,
    text: DelimitedFile,
}

impl FileReportSink {
    /// Creates `directory` if needed and opens `<stem>.csv` and `<stem>.txt`
    /// with their headers written.
    pub fn create(directory: &Path, stem: &str) -> Result<Self, JabejaError> {
        fs::create_dir_all(directory)
            .map_err(|err| JabejaError::io("output-mkdir", directory, err))?;
        let csv = DelimitedFile::create(directory.join(format!("{stem}.csv")), CSV_DELIMITER)?;
        let text = DelimitedFile::create(directory.join(format!("{stem}.txt")), TEXT_DELIMITER)?;
        Ok(Self { csv, text })
    }

    /// Paths of the two report files, csv first.
    pub fn paths(&self) -> Vec<PathBuf> {
        vec![self.csv.path.clone(), self.text.path.clone()]
    }
}

impl ReportSink for FileReportSink {
    fn record(&mut self, metrics: &RoundMetrics) -> Result<(), JabejaError> {
        self.csv.append(metrics)?;
        self.text.append(metrics)
    }

    fn finish(&mut self) -> Result<(), JabejaError> {
        for file in [&mut self.csv, &mut self.text] {
            file.writer
                .flush()
                .map_err(|err| JabejaError::io("report-write", &file.path, err))?;
        }
        Ok(())
    }
}

/// File name stem encoding the graph name and the run parameters, e.g.
/// `add20.graph_T_2.0_AP_false_R_0_D_0.003_A_2.0`.
pub fn report_stem(config: &RunConfig) -> String {
    let graph = config
        .output
        .graph_source
        .as_deref()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "graph".to_string());
    format!(
        "{graph}_T_{:?}_AP_{}_R_{}_D_{:?}_A_{:?}",
        config.temperature,
        config.acceptance.is_probabilistic(),
        config.reset_interval,
        config.delta,
        config.alpha
    )
}
