// Entry point: fetch database items, let the user pick, write the encrypted export.

use std::process;

use anyhow::{Context, Result};
use tpconn::cli::{parse_cli, CliArgs};
use tpconn::{connection, export, logging, ui, vault, Error};

async fn run(cli: CliArgs) -> Result<()> {
    let source = vault::OpCli::new(&cli.account)?;
    let (items, vaults) = vault::fetch_database_items(&source)
        .context("failed to read database items from 1Password")?;
    let (connections, groups) = connection::parse_available_connections(&items, &vaults);

    let exportable = if cli.all {
        connections
    } else {
        let selected = ui::run(connection::selectable_items(&connections), groups).await?;
        connection::retain_selected(connections, &selected)
    };
    tracing::info!(count = exportable.len(), "exporting connections");

    let bytes = export::build_export(&exportable, &cli.password)?;
    let path = export::write_export(&cli.output, &bytes)
        .with_context(|| format!("failed to write {}", export::export_path(&cli.output).display()))?;

    if cli.open {
        println!("Opening");
        export::open_with_app(&cli.app, &path)?;
    } else {
        println!("Exported");
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = parse_cli();
    if let Err(e) = logging::init(cli.log_file.as_deref()) {
        eprintln!("warning: {e}");
    }

    if let Err(err) = run(cli).await {
        // user cancelled: clean exit, no error report
        if let Some(Error::Aborted) = err.downcast_ref::<Error>() {
            tracing::info!("selection aborted");
            println!("{}", Error::Aborted);
            process::exit(1);
        }
        tracing::error!(error = %format!("{err:#}"), "export failed");
        eprintln!("error: {err:?}");
        process::exit(2);
    }
}
