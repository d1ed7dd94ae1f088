//! JSON persistence of belt records.
//!
//! The file is a plain array of [`BeltRecord`]s in belt id order, the same
//! shape `BeltSim::records` returns and `SimBuilder::records` accepts.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use belt_transport::BeltRecord;

use crate::OutputResult;

/// Write `records` to `path`, replacing any existing file.
pub fn save_belts(path: &Path, records: &[BeltRecord]) -> OutputResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, records)?;
    out.flush()?;
    log::debug!("saved {} belts to {}", records.len(), path.display());
    Ok(())
}

/// Read records written by [`save_belts`].
pub fn load_belts(path: &Path) -> OutputResult<Vec<BeltRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let records: Vec<BeltRecord> = serde_json::from_reader(reader)?;
    log::debug!("loaded {} belts from {}", records.len(), path.display());
    Ok(records)
}
