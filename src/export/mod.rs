// src/export/mod.rs

use anyhow::{Context, Result};
use arrow::record_batch::RecordBatch;
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};
use std::{fs::File, io::Write, path::Path};
use tracing::info;

use crate::aggregate::CountTable;
use crate::charts::Figure;
use crate::registry::RegistryTable;

/// Write the cleaned registry to a Snappy-compressed Parquet file.
pub fn write_table_parquet<P: AsRef<Path>>(table: &RegistryTable, path: P) -> Result<u64> {
    write_parquet(table.batch(), path.as_ref())
}

/// Write a summary table as `<key>, count`.
pub fn write_counts_parquet<P: AsRef<Path>>(counts: &CountTable, path: P) -> Result<u64> {
    let batch = counts
        .to_record_batch()
        .context("building count table batch")?;
    write_parquet(&batch, path.as_ref())
}

/// Pretty-printed JSON array of figures.
pub fn write_figures_json<W: Write>(figures: &[Figure], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, figures).context("serializing figures")?;
    writeln!(writer).context("writing figures")?;
    writer.flush().context("flushing figures")?;
    Ok(())
}

fn write_parquet(batch: &RecordBatch, output_path: &Path) -> Result<u64> {
    let file = File::create(output_path)
        .with_context(|| format!("creating file {}", output_path.display()))?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .context("creating parquet writer")?;
    writer.write(batch).context("writing batch to parquet")?;
    writer.close().context("closing parquet writer")?;

    let size = std::fs::metadata(output_path)
        .context("getting file metadata")?
        .len();
    info!(path = %output_path.display(), rows = batch.num_rows(), bytes = size, "wrote parquet");
    Ok(size)
}
