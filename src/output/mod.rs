//! Result artifact writing

use crate::models::EnrichedRecord;
use crate::report::{format_breakdown_csv, Breakdown};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENRICHED_CSV: &str = "login_events.csv";
pub const BREAKDOWN_CSV: &str = "login_events_breakdown.csv";
pub const BREAKDOWN_JSON: &str = "login_events_breakdown.json";

/// Writes one run's artifacts into the results directory
pub struct ArtifactWriter {
    directory: PathBuf,
}

impl ArtifactWriter {
    /// Create a writer rooted at `directory`, creating it if absent
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(ArtifactWriter { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Write all three artifacts for one pipeline run
    pub fn write_all(
        &self,
        records: &[EnrichedRecord],
        breakdown: &Breakdown,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.write_enriched_csv(records)?;
        self.write_breakdown_json(breakdown)?;
        self.write_breakdown_csv(breakdown)?;
        Ok(())
    }

    /// Tabular form of the enriched records, one row per input event
    pub fn write_enriched_csv(
        &self,
        records: &[EnrichedRecord],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let path = self.directory.join(ENRICHED_CSV);
        let mut writer = csv::Writer::from_path(&path)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        log::info!("Wrote {} enriched record(s) to {:?}", records.len(), path);
        Ok(())
    }

    /// JSON form of the breakdown, pretty-printed
    pub fn write_breakdown_json(&self, breakdown: &Breakdown) -> Result<(), Box<dyn std::error::Error>> {
        let path = self.directory.join(BREAKDOWN_JSON);
        let json = serde_json::to_string_pretty(breakdown)?;
        fs::write(&path, json)?;

        log::info!("Wrote breakdown JSON to {:?}", path);
        Ok(())
    }

    /// Flattened CSV form of the breakdown
    pub fn write_breakdown_csv(&self, breakdown: &Breakdown) -> Result<(), Box<dyn std::error::Error>> {
        let path = self.directory.join(BREAKDOWN_CSV);
        fs::write(&path, format_breakdown_csv(breakdown))?;

        log::info!("Wrote breakdown CSV to {:?}", path);
        Ok(())
    }
}
