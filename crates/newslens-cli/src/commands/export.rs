use std::path::Path;

use anyhow::Result;

use newslens_core::corpus::{CorpusStore, Table};
use newslens_core::{AppConfig, Error};

pub fn run(config: &AppConfig, table: Table, dest: &Path) -> Result<()> {
    let store = CorpusStore::from_config(config);
    match store.export(table, dest) {
        Ok(bytes) => {
            println!("Exported {} corpus ({} bytes) to {}", table.label(), bytes, dest.display());
            Ok(())
        }
        Err(Error::CorpusMissing(path)) => {
            let hint = match table {
                Table::Raw => "Run `newslens scrape` first.",
                Table::Enriched => "Run `newslens scrape` and then `newslens analyze` first.",
            };
            anyhow::bail!("No {} corpus at {}.\n{}", table.label(), path.display(), hint)
        }
        Err(e) => Err(e.into()),
    }
}
