use crate::config::EvolutionConfig;
use crate::engines::generation::{EliteProgram, GenerationStats};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Summary of one evolutionary run, written as JSON by the binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub config: EvolutionConfig,
    pub history: Vec<GenerationStats>,
    pub hall_of_fame: Vec<EliteProgram>,
}

impl RunReport {
    pub fn best(&self) -> Option<&EliteProgram> {
        self.hall_of_fame.first()
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}
