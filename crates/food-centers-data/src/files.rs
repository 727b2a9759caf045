use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use tracing::{info, instrument};

use crate::{FoodCenter, error::Result};

/// Read a JSON array of food centers.
#[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<FoodCenter>> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let records: Vec<FoodCenter> = serde_json::from_reader(reader)?;
    info!(count = records.len(), "Read food center records");
    Ok(records)
}

/// Write `records` as a pretty printed JSON array, replacing any existing file.
#[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display(), count = records.len()))]
pub fn write_records(path: impl AsRef<Path>, records: &[FoodCenter]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}
