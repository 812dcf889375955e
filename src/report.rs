use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::engine::PredictionBatch;

/// Persists prediction batches as pretty-printed JSON, one file per batch.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes `batch` to `<output_dir>/predictions_<YYYYmmdd_HHMM>.json`.
    pub fn write(&self, batch: &PredictionBatch) -> Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.output_dir)?;
        let file_name = format!(
            "predictions_{}.json",
            batch.generated_at.format("%Y%m%d_%H%M")
        );
        let file_path = self.output_dir.join(file_name);
        let json = serde_json::to_string_pretty(batch)?;
        fs::write(&file_path, json)?;
        Ok(file_path)
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("report serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{PredictionEngine, PredictionRequest};
    use crate::inputs::TerrainSample;
    use crate::spatial::BoundingBox;
    use chrono::NaiveDate;

    #[test]
    fn writes_batch_named_after_its_timestamp() {
        let request = PredictionRequest {
            at: NaiveDate::from_ymd_opt(2024, 10, 15)
                .unwrap()
                .and_hms_opt(6, 30, 0),
            ..PredictionRequest::new(
                BoundingBox {
                    north: 39.01,
                    south: 39.0,
                    east: -105.99,
                    west: -106.0,
                },
                TerrainSample {
                    elevation: 7000.0,
                    cover_density: 0.7,
                    water_sources: Vec::new(),
                    food_sources: Vec::new(),
                },
            )
        };
        let batch = PredictionEngine::default().predict(&request, None).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("reports"));
        let path = writer.write(&batch).unwrap();

        assert_eq!(
            path,
            dir.path().join("reports").join("predictions_20241015_0630.json")
        );
        let data = fs::read_to_string(path).unwrap();
        let back: PredictionBatch = serde_json::from_str(&data).unwrap();
        assert_eq!(back.season, batch.season);
        assert_eq!(back.predictions.len(), batch.predictions.len());
        assert!(data.contains("\"weather_available\": false"));
    }
}
