use crate::data_structures::ScoreReport;
use crate::suno::FetchError;
use async_trait::async_trait;
use fscore::analysis::evaluate_history;
use fscore::models::{CriteriaResult, IndicatorHistory};
use futures::future::join_all;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;
use tracing::{debug, error, info, instrument, warn};

const PROGRESS_EVERY: usize = 25;

/// Where per-ticker indicator histories come from.
#[async_trait]
pub trait IndicatorSource: Send + Sync {
    async fn fetch_history(&self, ticker: &str) -> Result<IndicatorHistory, FetchError>;
}

/// Fetches and scores every ticker, one task per ticker.
///
/// All tasks are spawned up front and at most `max_concurrency` of them talk
/// to the provider at once. The call returns once every task has finished.
/// A ticker whose fetch or evaluation fails is scored as the default result
/// and listed in the report's `unavailable` map; the other tickers are not
/// affected.
#[instrument(skip(source, tickers), fields(tickers = tickers.len()))]
pub async fn score_universe<S>(source: Arc<S>, tickers: &[String], max_concurrency: usize) -> ScoreReport
where
    S: IndicatorSource + ?Sized + 'static,
{
    let total = tickers.len();
    let permits = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let completed = Arc::new(AtomicUsize::new(0));

    info!(max_concurrency, "Starting indicator fan-out");

    let handles: Vec<_> = tickers
        .iter()
        .map(|ticker| {
            let source = Arc::clone(&source);
            let permits = Arc::clone(&permits);
            let completed = Arc::clone(&completed);
            let ticker = ticker.clone();

            tokio::spawn(async move {
                let _permit = permits.acquire_owned().await;
                let outcome = score_ticker(source.as_ref(), &ticker).await;

                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if done % PROGRESS_EVERY == 0 || done == total {
                    info!(done, total, "Fan-out progress");
                }
                outcome
            })
        })
        .collect();

    let outcomes = join_all(handles).await;

    let mut report = ScoreReport::default();
    for (ticker, outcome) in tickers.iter().zip(outcomes) {
        match outcome {
            Ok(Ok(result)) => {
                debug!(ticker = %ticker, score = result.score(), "Scored ticker");
                report.record_score(ticker.clone(), result);
            }
            Ok(Err(e)) => {
                warn!(ticker = %ticker, error = %e, "Indicators unavailable, scoring as zero");
                report.record_unavailable(ticker.clone(), e.to_string());
            }
            Err(e) => {
                error!(ticker = %ticker, error = %e, "Scoring task did not complete");
                report.record_unavailable(ticker.clone(), format!("scoring task failed: {}", e));
            }
        }
    }

    info!(
        evaluated = report.evaluated(),
        unavailable = report.unavailable.len(),
        "Completed indicator fan-out"
    );
    report
}

async fn score_ticker<S>(source: &S, ticker: &str) -> Result<CriteriaResult, FetchError>
where
    S: IndicatorSource + ?Sized,
{
    let history = source.fetch_history(ticker).await?;
    Ok(evaluate_history(&history)?)
}
