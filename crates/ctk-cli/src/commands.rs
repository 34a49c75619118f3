use anyhow::{Context, Result};
use comfy_table::Table;
use ctk_cli::json::{
    read_json, record_from_json, record_to_json, transfer_json_each, write_json,
};
use ctk_data::{CsvRowSource, to_records};
use ctk_transfer::{SkipSet, TransferReport};
use serde_json::Value as Json;
use tracing::{info, info_span};

use crate::cli::{InspectArgs, RowsArgs, TransferArgs};
use crate::summary::{apply_table_style, descriptor_rows};

pub fn run_transfer(args: &TransferArgs) -> Result<Vec<TransferReport>> {
    let span = info_span!("transfer", source = %args.source.display());
    let _guard = span.enter();
    let skip = args.skip.as_deref().map(SkipSet::parse).unwrap_or_default();
    let source = read_json(&args.source)?;
    let target = args.target.as_deref().map(read_json).transpose()?;

    let (result, reports) = transfer_json_each(&source, target.as_ref(), &skip)?;
    info!(
        objects = reports.len(),
        transferred = reports.iter().map(TransferReport::transferred_count).sum::<usize>(),
        skipped = reports.iter().map(TransferReport::skipped_count).sum::<usize>(),
        excluded = skip.len(),
        "transfer complete"
    );
    write_json(&result, args.output.as_deref())?;
    Ok(reports)
}

pub fn run_rows(args: &RowsArgs) -> Result<usize> {
    let span = info_span!("rows", file = %args.file.display());
    let _guard = span.enter();
    let mut source = CsvRowSource::from_path(&args.file)
        .with_context(|| format!("open {}", args.file.display()))?;
    let records =
        to_records(&mut source).with_context(|| format!("read {}", args.file.display()))?;
    info!(records = records.len(), "converted rows");
    let json = Json::Array(records.iter().map(record_to_json).collect());
    write_json(&json, args.output.as_deref())?;
    Ok(records.len())
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let span = info_span!("inspect", file = %args.file.display());
    let _guard = span.enter();
    let record = record_from_json(&read_json(&args.file)?)
        .with_context(|| format!("describe {}", args.file.display()))?;
    let descriptors = record.descriptors();
    if args.json {
        let json = serde_json::to_value(&descriptors).context("serialize descriptors")?;
        return write_json(&json, None);
    }
    let mut table = Table::new();
    table.set_header(vec!["Property", "Type", "Readable", "Writable"]);
    apply_table_style(&mut table);
    for row in descriptor_rows(&descriptors) {
        table.add_row(row);
    }
    println!("{table}");
    Ok(())
}
