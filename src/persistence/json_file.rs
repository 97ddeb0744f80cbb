use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use serde_json::{from_reader, to_writer_pretty};

use super::{PersistenceError, Snapshot};

pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot, PersistenceError> {
    let file = File::open(path.as_ref())?;
    let snapshot: Snapshot = from_reader(BufReader::new(file))?;

    info!(
        "Loaded {} users, {} wishes and {} offers from {}",
        snapshot.users.len(),
        snapshot.wishes.len(),
        snapshot.offers.len(),
        path.as_ref().display()
    );
    Ok(snapshot)
}

pub fn write_snapshot<P: AsRef<Path>>(
    path: P,
    snapshot: &Snapshot,
) -> Result<(), PersistenceError> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path.as_ref())?;

    let mut writer = BufWriter::new(file);
    to_writer_pretty(&mut writer, snapshot)?;
    writer.flush()?;

    info!("Wrote {} offers to {}", snapshot.offers.len(), path.as_ref().display());
    Ok(())
}
