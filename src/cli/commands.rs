//! CLI command implementations
//!
//! Every command follows the same boot sequence:
//! 1. Configuration load
//! 2. Logging init
//! 3. Schema load
//! 4. Store open (commands that touch vendor data)

use std::io::{self, BufRead, Write};
use std::path::Path;

use chrono::Local;
use serde_json::json;
use tracing::{info, info_span};
use uuid::Uuid;

use crate::observability::init_logging;
use crate::portal::render::{render_form, render_table};
use crate::portal::{listing_json, PortalHandler, Response};
use crate::schema::{FormSchema, FormValues};
use crate::store::SheetBackend;

use super::args::Command;
use super::config::Config;
use super::errors::CliResult;
use super::io::{read_requests, write_json, write_text, write_value};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Start { config } => start(&config),
        Command::View { config, plain } => view(&config, plain),
        Command::Schema { config } => schema(&config),
        Command::CheckConfig { config } => check_config(&config),
    }
}

fn boot(config_path: &Path) -> CliResult<(Config, FormSchema)> {
    let config = Config::load(config_path)?;
    init_logging(&config.log_level, config.log_format)?;
    info!(config = %config_path.display(), store = config.store.kind(), "config loaded");

    let schema = config.load_schema()?;
    info!(fields = schema.len(), "form schema loaded");

    Ok((config, schema))
}

/// Serve the portal over stdin/stdout until EOF
pub fn start(config_path: &Path) -> CliResult<()> {
    let (config, schema) = boot(config_path)?;
    let store = config.build_store(&schema)?;
    let mut handler = PortalHandler::new(schema, store);

    let session = Uuid::new_v4();
    let span = info_span!("session", id = %session);
    let _guard = span.enter();
    info!("portal session started");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let served = serve(&mut handler, stdin.lock(), &mut stdout)?;

    info!(requests = served, "portal session ended");
    Ok(())
}

/// Answer each request line with one response line.
///
/// Bad requests get an error response and the loop continues; only I/O
/// failures end it early. Returns the number of requests answered.
pub fn serve<B, R, W>(handler: &mut PortalHandler<B>, reader: R, writer: &mut W) -> CliResult<usize>
where
    B: SheetBackend,
    R: BufRead,
    W: Write,
{
    let mut served = 0;
    for line in read_requests(reader) {
        let line = line?;
        let response = handler.handle(&line);
        write_json(writer, &response.to_json())?;
        served += 1;
    }
    Ok(served)
}

/// Print all vendors and exit
pub fn view(config_path: &Path, plain: bool) -> CliResult<()> {
    let (config, schema) = boot(config_path)?;
    let mut store = config.build_store(&schema)?;
    let snapshot = store.read_all().into_result()?;

    if plain {
        write_text(&render_table(&snapshot.header, &snapshot.records))
    } else {
        let mut stdout = io::stdout();
        write_json(&mut stdout, &Response::success(listing_json(&snapshot)).to_json())
    }
}

/// Print the blank form's widgets and exit
pub fn schema(config_path: &Path) -> CliResult<()> {
    let (_, schema) = boot(config_path)?;
    let widgets = render_form(&schema, &FormValues::new(), Local::now().date_naive());

    let mut stdout = io::stdout();
    write_value(&mut stdout, &json!({ "status": "ok", "data": { "fields": widgets } }))
}

/// Validate config and schema, then print the resolved settings
pub fn check_config(config_path: &Path) -> CliResult<()> {
    let (config, schema) = boot(config_path)?;

    let mut stdout = io::stdout();
    write_value(
        &mut stdout,
        &json!({
            "status": "ok",
            "data": {
                "config": config,
                "fields": schema.labels(),
            }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::vendor::vendor_form_schema;
    use crate::store::{MemorySheet, RecordStore, StoreOptions};
    use serde_json::Value;

    fn handler() -> PortalHandler<MemorySheet> {
        let schema = vendor_form_schema();
        let sheet = MemorySheet::new(schema.labels());
        PortalHandler::new(schema, RecordStore::new(sheet, StoreOptions::default()))
    }

    fn responses(out: Vec<u8>) -> Vec<Value> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_serve_answers_every_line() {
        let input = concat!(
            "{\"action\": \"actions\"}\n",
            "this is not json\n",
            "\n",
            "{\"action\": \"view\"}\n",
        );
        let mut out = Vec::new();
        let served = serve(&mut handler(), input.as_bytes(), &mut out).unwrap();

        assert_eq!(served, 3);
        let responses = responses(out);
        assert_eq!(responses[0]["status"], "ok");
        assert_eq!(responses[1]["status"], "error");
        assert_eq!(responses[1]["code"], "PORTAL_INVALID_REQUEST");
        assert_eq!(responses[2]["data"]["count"], 0);
    }

    #[test]
    fn test_check_config_rejects_missing_file() {
        let err = check_config(Path::new("/nonexistent/vendor-portal.json")).unwrap_err();
        assert_eq!(err.code_str(), "PORTAL_CLI_CONFIG_ERROR");
    }
}
