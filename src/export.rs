use std::collections::BTreeMap;
use std::fs::File;
use std::hash::Hash;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::solver::Plan;

/// A solved model as written to disk: objective plus every variable by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionRecord {
    pub problem: String,
    pub objective: f64,
    pub variables: BTreeMap<String, f64>,
}

impl<K> From<&Plan<K>> for SolutionRecord
where
    K: Clone + Eq + Hash,
{
    fn from(plan: &Plan<K>) -> Self {
        SolutionRecord {
            problem: plan.problem().to_string(),
            objective: plan.objective(),
            variables: plan
                .iter()
                .map(|(_, name, value)| (name.to_string(), value))
                .collect(),
        }
    }
}

impl SolutionRecord {
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self).context("serialising solution")?;
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("creating solution file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        log::info!("solution written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_as_nested_record() {
        let record = SolutionRecord {
            problem: "workforce_allocation".to_string(),
            objective: 432.0,
            variables: BTreeMap::from([("x_R".to_string(), 3.75), ("x_N".to_string(), 0.0)]),
        };
        let mut buf = Vec::new();
        record.write_to(&mut buf).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["problem"], "workforce_allocation");
        assert_eq!(json["objective"], 432.0);
        assert_eq!(json["variables"]["x_R"], 3.75);

        let back: SolutionRecord = serde_json::from_slice(&buf).unwrap();
        assert_eq!(back, record);
    }
}
