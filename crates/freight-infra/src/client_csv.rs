//! CSV loader for client lists
//!
//! Expected header: `name,cargo_weight[,is_vip]`. The VIP column accepts
//! true/false, yes/no, y/n and 1/0; an empty or missing value means not VIP.

use std::io::Read;
use std::path::Path;

use freight_domain::Client;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientCsvError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid VIP flag in row {row}: {value}")]
    InvalidFlag { row: usize, value: String },

    #[error("Invalid client in row {row}: {source}")]
    InvalidClient {
        row: usize,
        source: freight_types::ValidationError,
    },

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

impl From<ClientCsvError> for freight_types::Error {
    fn from(err: ClientCsvError) -> Self {
        freight_types::Error::Import(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ClientRow {
    name: String,
    #[serde(alias = "cargo_weight_t", alias = "weight")]
    cargo_weight: f64,
    #[serde(default)]
    is_vip: Option<String>,
}

/// Load clients from a CSV file
pub fn load_clients_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Client>, ClientCsvError> {
    let file = std::fs::File::open(path)?;
    load_clients_from_reader(file)
}

/// Load clients from any CSV source
pub fn load_clients_from_reader<R: Read>(source: R) -> Result<Vec<Client>, ClientCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    validate_headers(&headers)?;

    let mut clients = Vec::new();
    for (row_idx, result) in reader.deserialize::<ClientRow>().enumerate() {
        let row = result?;
        let row_num = row_idx + 2; // header is row 1

        let is_vip = parse_flag(row.is_vip.as_deref().unwrap_or(""), row_num)?;
        let client = Client::new(row.name, row.cargo_weight, is_vip)
            .map_err(|source| ClientCsvError::InvalidClient { row: row_num, source })?;
        clients.push(client);
    }

    Ok(clients)
}

fn validate_headers(headers: &csv::StringRecord) -> Result<(), ClientCsvError> {
    if !headers.iter().any(|h| h == "name") {
        return Err(ClientCsvError::MissingColumn("name".to_string()));
    }
    if !headers
        .iter()
        .any(|h| matches!(h, "cargo_weight" | "cargo_weight_t" | "weight"))
    {
        return Err(ClientCsvError::MissingColumn("cargo_weight".to_string()));
    }
    Ok(())
}

fn parse_flag(value: &str, row: usize) -> Result<bool, ClientCsvError> {
    match value.trim().to_lowercase().as_str() {
        "" | "false" | "no" | "n" | "0" => Ok(false),
        "true" | "yes" | "y" | "1" | "vip" => Ok(true),
        other => Err(ClientCsvError::InvalidFlag {
            row,
            value: other.to_string(),
        }),
    }
}
