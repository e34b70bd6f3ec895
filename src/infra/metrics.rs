// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file after each epoch —
// easy to plot learning curves from and a permanent record of
// each run.
//
// Output file: <checkpoint_dir>/metrics.csv
//
//   epoch,train_loss,val_loss,perplexity
//   1,6.124500,6.089200,440.831
//   2,5.890100,5.854300,348.902
//
// val_loss tracking train_loss means the model generalises;
// val_loss rising while train_loss falls means overfitting.
// Perplexity is exp(val_loss) — how "surprised" the model is
// per token on unseen exam text.

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

/// One row of metrics data for a single training epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Average next-token cross-entropy over training batches
    pub train_loss: f64,

    /// Average next-token cross-entropy on the validation set
    pub val_loss: f64,

    /// exp(val_loss) — per-token perplexity on unseen text
    pub perplexity: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64, val_loss: f64, perplexity: f64) -> Self {
        Self { epoch, train_loss, val_loss, perplexity }
    }

    /// True if this epoch improved over the previous best val_loss.
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss < best_val_loss
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger, writing the CSV header if the
    /// file doesn't exist yet (appending lets a resumed run keep
    /// its history).
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,val_loss,perplexity")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new CSV row.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.3}",
            m.epoch,
            m.train_loss,
            m.val_loss,
            m.perplexity,
        )?;

        tracing::debug!(
            "Logged epoch {} metrics: train_loss={:.4}, val_loss={:.4}",
            m.epoch,
            m.train_loss,
            m.val_loss,
        );

        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_improvement() {
        let m = EpochMetrics::new(2, 2.5, 2.3, 9.97);
        assert!(m.is_improvement(3.0));
        assert!(!m.is_improvement(2.0));
    }

    #[test]
    fn test_header_written_once_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap().to_string();

        let logger = MetricsLogger::new(path.clone()).unwrap();
        logger.log(&EpochMetrics::new(1, 6.1, 6.0, 403.4)).unwrap();
        drop(logger);

        // A second logger over the same dir appends, no new header
        let logger = MetricsLogger::new(path).unwrap();
        logger.log(&EpochMetrics::new(2, 5.9, 5.8, 330.3)).unwrap();

        let csv = fs::read_to_string(logger.csv_path()).unwrap();
        let headers = csv.lines().filter(|l| l.starts_with("epoch,")).count();
        assert_eq!(headers, 1);
        assert_eq!(csv.lines().count(), 3);
    }
}
