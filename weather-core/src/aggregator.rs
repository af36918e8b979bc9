use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::{error::WeatherError, model::AggregateResult, provider::WeatherProvider, units::Kelvin};

/// Fans one temperature request out to every configured provider and folds
/// their answers into a single average.
///
/// The provider list is fixed at construction and shared read-only across
/// requests; providers hold nothing mutable beyond their HTTP clients, so no
/// locking is needed.
#[derive(Debug)]
pub struct MultiProvider {
    providers: Vec<Arc<dyn WeatherProvider>>,
}

impl MultiProvider {
    pub fn new(providers: Vec<Arc<dyn WeatherProvider>>) -> Self {
        Self { providers }
    }

    /// Queries all providers concurrently and averages their readings.
    ///
    /// Each provider runs in its own spawned task and publishes its outcome
    /// into one of two channels, both sized to hold every outcome so a
    /// publish never blocks. The receive loop takes exactly N outcomes,
    /// summing temperatures and returning immediately on the first error it
    /// sees. Which error wins when several providers fail depends on response
    /// latency, not list order. Stragglers are neither awaited nor cancelled;
    /// their late publishes land in the buffered channels and are dropped
    /// with them.
    ///
    /// There is no per-provider deadline: a provider that never answers and
    /// never fails leaves the receive loop waiting unless another provider
    /// errors first.
    pub async fn temperature(&self, city: &str) -> Result<AggregateResult, WeatherError> {
        let n = self.providers.len();
        if n == 0 {
            return Err(WeatherError::NoProviders);
        }

        let started = Instant::now();
        let (temp_tx, mut temp_rx) = mpsc::channel::<Kelvin>(n);
        let (err_tx, mut err_rx) = mpsc::channel::<WeatherError>(n);

        for provider in &self.providers {
            let provider = Arc::clone(provider);
            let city = city.to_owned();
            let temp_tx = temp_tx.clone();
            let err_tx = err_tx.clone();

            tokio::spawn(async move {
                match provider.temperature(&city).await {
                    // Send only fails once the receiving side has been
                    // dropped, i.e. the request already ended with an error.
                    Ok(kelvin) => {
                        let _ = temp_tx.send(kelvin).await;
                    }
                    Err(err) => {
                        let _ = err_tx.send(err).await;
                    }
                }
            });
        }

        let mut sum = 0.0;
        for _ in 0..n {
            tokio::select! {
                Some(kelvin) = temp_rx.recv() => sum += kelvin.0,
                Some(err) = err_rx.recv() => return Err(err),
            }
        }

        Ok(AggregateResult {
            city: city.to_owned(),
            average: Kelvin(sum / n as f64),
            elapsed: started.elapsed(),
        })
    }
}
