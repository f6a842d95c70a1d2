//! Configuration file
//!
//! ```json
//! {
//!   "store": {"kind": "sheets", "spreadsheet_id": "1AbC", "worksheet": "Sheet1",
//!             "sheet_gid": 0, "token_env": "GOOGLE_SHEETS_TOKEN"},
//!   "cache_ttl_secs": 5,
//!   "log_level": "info"
//! }
//! ```
//!
//! Every field except `store` may be omitted.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::observability::{parse_level, LogFormat};
use crate::schema::{FormSchema, SchemaLoader};
use crate::store::{
    FileSheet, GoogleSheet, GoogleSheetConfig, MemorySheet, RecordStore, SheetBackend,
    StoreError, StoreOptions,
};

use super::errors::{CliError, CliResult};

/// Store selected by the config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreConfig {
    /// Rows held in memory for the life of the process
    Memory,
    /// Rows in a local JSON file
    File { path: PathBuf },
    /// A Google Sheets worksheet
    Sheets {
        spreadsheet_id: String,
        #[serde(default = "default_worksheet")]
        worksheet: String,
        /// Numeric sheet id used by row insert/delete
        #[serde(default)]
        sheet_gid: i64,
        /// Environment variable holding the OAuth bearer token
        #[serde(default = "default_token_env")]
        token_env: String,
    },
}

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub store: StoreConfig,

    /// Columns fetched on read (0-based), starting with the form's own
    #[serde(default = "default_columns")]
    pub columns: Vec<usize>,

    /// Seconds a sheet read stays cached; 0 disables caching
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Form schema file; the built-in vendor form when absent
    #[serde(default)]
    pub schema_path: Option<PathBuf>,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_worksheet() -> String {
    "Sheet1".to_string()
}
fn default_token_env() -> String {
    "GOOGLE_SHEETS_TOKEN".to_string()
}
fn default_columns() -> Vec<usize> {
    (0..6).collect()
}
fn default_cache_ttl_secs() -> u64 {
    5
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(json)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        parse_level(&self.log_level)?;

        if self.columns.is_empty() {
            return Err(CliError::config_error("columns must not be empty"));
        }

        if let StoreConfig::Sheets {
            spreadsheet_id,
            worksheet,
            token_env,
            ..
        } = &self.store
        {
            if spreadsheet_id.trim().is_empty() {
                return Err(CliError::config_error("spreadsheet_id must not be empty"));
            }
            if worksheet.trim().is_empty() {
                return Err(CliError::config_error("worksheet must not be empty"));
            }
            if token_env.trim().is_empty() {
                return Err(CliError::config_error("token_env must not be empty"));
            }
        }

        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            columns: Some(self.columns.clone()),
            cache_ttl: self.cache_ttl(),
        }
    }

    /// Load the form schema and check `columns` against it
    pub fn load_schema(&self) -> CliResult<FormSchema> {
        let schema = SchemaLoader::load(self.schema_path.as_deref())?;
        self.check_columns(&schema)?;
        Ok(schema)
    }

    /// The fetched columns must begin with the form's columns `0..n` in order
    fn check_columns(&self, schema: &FormSchema) -> CliResult<()> {
        let aligned = self.columns.len() >= schema.len()
            && self.columns.iter().take(schema.len()).copied().eq(0..schema.len());
        if aligned {
            Ok(())
        } else {
            Err(CliError::config_error(format!(
                "columns must start with 0..{} to match the {} form fields, got {:?}",
                schema.len(),
                schema.len(),
                self.columns
            )))
        }
    }

    /// Open the configured backend.
    ///
    /// Local backends start with `header` when they hold no rows yet.
    pub fn open_backend(&self, header: &[String]) -> CliResult<Box<dyn SheetBackend>> {
        let backend: Box<dyn SheetBackend> = match &self.store {
            StoreConfig::Memory => Box::new(MemorySheet::new(header.to_vec())),
            StoreConfig::File { path } => Box::new(FileSheet::open(path, header)?),
            StoreConfig::Sheets {
                spreadsheet_id,
                worksheet,
                sheet_gid,
                token_env,
            } => {
                let token = env::var(token_env).map_err(|_| StoreError::Unauthorized)?;
                let config = GoogleSheetConfig::new(spreadsheet_id, worksheet, *sheet_gid, token);
                Box::new(GoogleSheet::new(config)?)
            }
        };

        info!(store = self.store.kind(), "record store opened");
        Ok(backend)
    }

    pub fn build_store(&self, schema: &FormSchema) -> CliResult<RecordStore<Box<dyn SheetBackend>>> {
        self.check_columns(schema)?;
        let backend = self.open_backend(&schema.labels())?;
        Ok(RecordStore::new(backend, self.store_options()))
    }
}

impl StoreConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreConfig::Memory => "memory",
            StoreConfig::File { .. } => "file",
            StoreConfig::Sheets { .. } => "sheets",
        }
    }
}
