use crate::arbitrage::MetadataIndex;
use crate::errors::{AppError, Result};
use crate::models::{SymbolRecord, Tick};
use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::info;

#[derive(Debug, Deserialize)]
struct ExchangeInfo {
    symbols: Vec<SymbolRecord>,
}

/// Combined-stream wrapper: `{"stream": "...", "data": <payload>}`.
#[derive(Debug, Deserialize)]
struct StreamEnvelope<'a> {
    #[serde(rename = "stream")]
    _stream: String,
    #[serde(borrow)]
    data: &'a RawValue,
}

/// Decode an `exchangeInfo` body into symbol records.
pub fn parse_exchange_info(body: &str) -> Result<Vec<SymbolRecord>> {
    serde_json::from_str::<ExchangeInfo>(body)
        .map(|info| info.symbols)
        .map_err(|e| AppError::MetadataLoad(format!("exchangeInfo decode failed: {e}")))
}

/// Fetch venue symbol metadata over HTTP.
pub async fn fetch_exchange_info(url: &str) -> Result<Vec<SymbolRecord>> {
    let meta_err = |e: reqwest::Error| AppError::MetadataLoad(format!("GET {url}: {e}"));
    let body = reqwest::get(url)
        .await
        .map_err(meta_err)?
        .error_for_status()
        .map_err(meta_err)?
        .text()
        .await
        .map_err(meta_err)?;
    parse_exchange_info(&body)
}

/// Build the metadata index from raw records, refusing an index with nothing tradeable.
pub fn index_from_records(records: &[SymbolRecord]) -> Result<MetadataIndex> {
    let index = MetadataIndex::from_records(records);
    if index.is_empty() {
        return Err(AppError::MetadataLoad(format!(
            "none of {} symbols is tradeable",
            records.len()
        )));
    }
    info!(
        symbols = index.len(),
        assets = index.asset_count(),
        total = records.len(),
        "[META] symbol index ready"
    );
    Ok(index)
}

/// Fetch and index venue metadata in one step.
pub async fn load_metadata_index(url: &str) -> Result<MetadataIndex> {
    let records = fetch_exchange_info(url).await?;
    index_from_records(&records)
}

/// Decode one ticker socket message into its tick batch.
///
/// Accepts the all-market array, a single ticker, or either wrapped in a
/// combined-stream envelope. Bad price fields do not fail decoding; they
/// surface as invalid prices when the tick is applied.
pub fn parse_ticker_batch(text: &str) -> Result<Vec<Tick>> {
    let decoded = if text.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<Tick>>(text)
    } else if let Ok(envelope) = serde_json::from_str::<StreamEnvelope>(text) {
        return parse_ticker_batch(envelope.data.get());
    } else {
        serde_json::from_str::<Tick>(text).map(|tick| vec![tick])
    };
    decoded.map_err(|e| AppError::StreamRead(format!("ticker decode failed: {e}")))
}
