//! Walk through an add/delete round trip against an in-process service.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use intab_core::{row, ColumnType, MemoryTable, Schema, Table};
use intab_registry::InputTableRegistry;
use intab_resolver::SessionTickets;
use intab_service::{logging, AddTableRequest, DeleteTableRequest, InputTableService, ServiceConfig};

#[derive(Debug, Parser)]
#[command(name = "intab-demo", about = "Add and delete rows in an input table by ticket")]
struct Args {
    /// TOML service configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Repeat the delete to show it is idempotent.
    #[arg(long)]
    repeat_delete: bool,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ServiceConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ServiceConfig::default(),
    };

    let registry = Arc::new(InputTableRegistry::new());
    let service = InputTableService::new(SessionTickets::new(1), registry).with_config(config);

    let schema = Schema::new()
        .column("id", ColumnType::Int)
        .column("val", ColumnType::String);
    let input = service.registry().create_keyed(schema.clone(), &["id"])?;
    let input_ticket = service.resolver().export(input.clone());

    let added = service
        .resolver()
        .export(MemoryTable::handle(schema.clone(), vec![row![1, "a"], row![2, "b"]]));
    service.add_table_to_input_table(AddTableRequest::new(input_ticket.clone(), added))?;
    print_rows("after add", &*input)?;

    let removed = service
        .resolver()
        .export(MemoryTable::handle(schema, vec![row![1, "a"]]));
    let rounds = if args.repeat_delete { 2 } else { 1 };
    for _ in 0..rounds {
        service.delete_table_from_input_table(DeleteTableRequest::new(
            input_ticket.clone(),
            removed.clone(),
        ))?;
        print_rows("after delete", &*input)?;
    }

    Ok(())
}

fn print_rows(label: &str, table: &dyn Table) -> Result<()> {
    println!("{} {}:", label, table.schema());
    for row in table.read_rows()? {
        println!("  {}", row);
    }
    Ok(())
}
