use async_trait::async_trait;
use fscore::FscoreError;
use fscore::models::IndicatorHistory;
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client, StatusCode,
};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::worker::IndicatorSource;

pub const DEFAULT_BASE_URL: &str = "https://api-analitica.sunoresearch.com.br/api";

// The provider refuses requests that do not look like a browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows; U; Windows NT 6.1; rv:2.2) Gecko/20110201";
const ACCEPT: &str = "text/html, text/plain, text/css, text/sgml, */*;q=0.01";

const DASHBOARD_ENDPOINT: &str = "Indicator/GetIndicatorsDashboard";
const YEARLY_ENDPOINT: &str = "Indicator/GetIndicatorsYear";

/// Reasons a ticker's indicators could not be obtained. Each one makes the
/// ticker's data unavailable for the run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },

    #[error("response is not a JSON array of records: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    History(#[from] FscoreError),
}

/// Client for the Suno indicator API.
///
/// Cookies handed out by the provider are kept in a jar shared by every
/// request made through the same client.
pub struct SunoClient {
    client: Client,
    base_url: String,
}

impl SunoClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));

        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(SunoClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Latest indicators shown on the company dashboard.
    pub async fn get_dashboard(&self, ticker: &str) -> Result<Vec<Value>, FetchError> {
        self.get_indicators(DASHBOARD_ENDPOINT, ticker).await
    }

    /// Indicators per fiscal year, most recent first.
    pub async fn get_yearly(&self, ticker: &str) -> Result<Vec<Value>, FetchError> {
        self.get_indicators(YEARLY_ENDPOINT, ticker).await
    }

    /// Dashboard records followed by the yearly records.
    #[instrument(skip(self))]
    pub async fn fetch_history(&self, ticker: &str) -> Result<IndicatorHistory, FetchError> {
        let (dashboard, yearly) = tokio::try_join!(self.get_dashboard(ticker), self.get_yearly(ticker))?;
        debug!(dashboard = dashboard.len(), yearly = yearly.len(), "Fetched indicator history");
        Ok(IndicatorHistory::from_periods(dashboard, yearly))
    }

    async fn get_indicators(&self, endpoint: &str, ticker: &str) -> Result<Vec<Value>, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self.client.get(&url).query(&[("ticker", ticker)]).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        let body = response.bytes().await?;
        let records: Vec<Value> = serde_json::from_str(&decode_latin1(&body))?;
        Ok(records)
    }
}

#[async_trait]
impl IndicatorSource for SunoClient {
    async fn fetch_history(&self, ticker: &str) -> Result<IndicatorHistory, FetchError> {
        SunoClient::fetch_history(self, ticker).await
    }
}

/// ISO-8859-1 maps every byte to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| char::from(byte)).collect()
}
