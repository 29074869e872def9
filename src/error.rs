// src/error.rs

use std::io;

use thiserror::Error;

/// Failures while reading the zone reference workbook.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("cannot open workbook: {0}")]
    Open(#[from] calamine::Error),
    #[error("workbook contains no sheets")]
    NoSheets,
    #[error("reference sheet is empty")]
    Empty,
    #[error("reference must contain a '{0}' column")]
    MissingColumn(String),
}

/// Failures while talking to the visitor-counting API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid API host '{host}': {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("server returned an empty 'data' list")]
    EmptyData,
}

/// The response decoded fine but cannot be turned into a table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("'selected' list is empty, no zones to display")]
    NoSelectedZones,
}

/// Any condition that ends a report run.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("zone reference: {0}")]
    Config(#[from] ReferenceError),
    #[error("visitor API: {0}")]
    Network(#[from] FetchError),
    #[error("visitor data: {0}")]
    Data(#[from] DataError),
    #[error("cannot write report: {0}")]
    Output(#[from] io::Error),
}

impl ReportError {
    /// Process exit status; every failure is reported as 1.
    pub fn exit_code(&self) -> u8 {
        1
    }
}
