//! Loading the configuration and snapshot a command runs against, and
//! writing the snapshot back afterwards.

use anyhow::{Context, Result};

use unitrack_commission::{CommissionConfig, CommissionEngine};
use unitrack_store::{InMemoryStore, Snapshot};

use crate::GlobalOptions;

/// Resolve the commission configuration: the file named by `--config`, or
/// the built-in table.
pub fn load_config(opts: &GlobalOptions) -> Result<CommissionConfig> {
    match &opts.config {
        Some(path) => CommissionConfig::load(path)
            .with_context(|| format!("failed to load commission config {}", path.display())),
        None => Ok(CommissionConfig::default()),
    }
}

/// Build an engine over the snapshot named by `--data`.
pub fn open_engine(opts: &GlobalOptions) -> Result<CommissionEngine<InMemoryStore>> {
    let config = load_config(opts)?;
    let snapshot = Snapshot::load(&opts.data)
        .with_context(|| format!("failed to load records from {}", opts.data.display()))?;
    Ok(CommissionEngine::new(config, snapshot.into_store()))
}

/// Write the store back to the `--data` snapshot.
pub fn persist(opts: &GlobalOptions, store: &InMemoryStore) -> Result<()> {
    Snapshot::from_store(store)
        .save(&opts.data)
        .with_context(|| format!("failed to write records to {}", opts.data.display()))
}
