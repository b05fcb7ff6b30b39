use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::app::{Result, TilawaError};
use crate::domain::SurahDetail;
use crate::source::ContentSource;

pub const DEFAULT_WORKERS: usize = 10;

/// Runs surah lookups concurrently with at most `workers` requests in flight.
pub struct ParallelFetcher {
    source: Arc<dyn ContentSource + Send + Sync>,
    semaphore: Arc<Semaphore>,
}

impl ParallelFetcher {
    pub fn new(source: Arc<dyn ContentSource + Send + Sync>) -> Self {
        Self::with_workers(source, DEFAULT_WORKERS)
    }

    pub fn with_workers(source: Arc<dyn ContentSource + Send + Sync>, workers: usize) -> Self {
        Self {
            source,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Fetches every surah in `numbers`; results come back in input order.
    pub async fn fetch_surahs(&self, numbers: Vec<u16>) -> Vec<(u16, Result<SurahDetail>)> {
        let mut handles = Vec::new();

        for number in numbers {
            let source = self.source.clone();
            let semaphore = self.semaphore.clone();

            let handle = tokio::spawn(async move {
                let result = match semaphore.acquire().await {
                    Ok(_permit) => source.surah(number).await,
                    Err(e) => Err(TilawaError::Other(format!("Semaphore closed: {}", e))),
                };
                (number, result)
            });

            handles.push(handle);
        }

        join_all(handles)
            .await
            .into_iter()
            .filter_map(|joined| match joined {
                Ok(result) => Some(result),
                Err(e) => {
                    tracing::error!("Task join error: {}", e);
                    None
                }
            })
            .collect()
    }
}
