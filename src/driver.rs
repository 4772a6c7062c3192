//! Driver spawns and manages the frame sampling task

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use crate::config::SamplerConfig;
use crate::estimation::{FpsEstimator, FrameSampler};
use crate::provider::PlaybackProvider;
use crate::types::SamplingProgress;

/// Result of spawning the driver task
pub struct DriverChannels {
    /// Receiver for sampling progress; closes when the task ends
    pub progress: watch::Receiver<SamplingProgress>,
    /// Cancellation token for shutdown
    pub cancel: CancellationToken,
}

/// Driver spawns and manages the frame sampling task
///
/// The spawned task owns both the provider and the sampler. It requests one
/// event, processes it to completion, publishes progress and only then asks
/// for the next event, so the sampler is never re-entered.
pub struct Driver;

impl Driver {
    /// Spawn the sampling task for the given provider
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<P>(provider: P, config: SamplerConfig) -> DriverChannels
    where
        P: PlaybackProvider,
    {
        // Observers see the default estimate until the first event arrives
        let estimator = FpsEstimator::new(&config);
        let initial = SamplingProgress::initial(estimator.capacity(), estimator.default_fps());
        let sampler = FrameSampler::new(config);
        let (progress_tx, progress_rx) = watch::channel(initial);
        let cancel = CancellationToken::new();
        let cancel_task = cancel.clone();

        tokio::spawn(async move {
            Self::sampling_task(provider, sampler, progress_tx, cancel_task).await;
        });

        DriverChannels { progress: progress_rx, cancel }
    }

    async fn sampling_task<P>(
        mut provider: P,
        mut sampler: FrameSampler,
        progress_tx: watch::Sender<SamplingProgress>,
        cancel: CancellationToken,
    ) where
        P: PlaybackProvider,
    {
        info!("Sampling task started");
        let mut event_count = 0u64;
        let mut error_count = 0u32;
        let mut announced_ready = false;
        const MAX_ERRORS: u32 = 10;

        loop {
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Sampling task cancelled");
                    break;
                }
                result = provider.next_event() => result,
            };

            match result {
                Ok(Some(event)) => {
                    event_count += 1;
                    error_count = 0;

                    let outcome = sampler.process(&event);
                    trace!(event_count, ?outcome, samples = sampler.len(), "Processed event");

                    let progress = sampler.progress();
                    if progress.ready && !announced_ready {
                        announced_ready = true;
                        info!(
                            fps = progress.fps,
                            average = sampler.average(),
                            "Frame rate determined after {} events",
                            event_count
                        );
                    }

                    // Observers are only woken when the snapshot changed
                    progress_tx.send_if_modified(|current| {
                        if *current == progress {
                            false
                        } else {
                            *current = progress;
                            true
                        }
                    });

                    if progress_tx.is_closed() {
                        debug!("Progress receivers dropped, shutting down");
                        break;
                    }
                }
                Ok(None) => {
                    info!("Playback source ended after {} events", event_count);
                    break;
                }
                Err(e) => {
                    error_count += 1;
                    error!("Provider error ({}/{}): {}", error_count, MAX_ERRORS, e);

                    if error_count >= MAX_ERRORS {
                        error!("Too many provider errors, shutting down");
                        break;
                    }

                    // Exponential backoff: 100ms, 200ms, 400ms, ...
                    let backoff = std::time::Duration::from_millis(50 * (1 << error_count.min(5)));
                    tokio::select! {
                        _ = cancel.cancelled() => {
                            info!("Sampling task cancelled during backoff");
                            break;
                        }
                        _ = tokio::time::sleep(backoff) => {}
                    }
                }
            }
        }

        if !sampler.is_ready() {
            warn!(
                samples = sampler.len(),
                capacity = sampler.config().capacity,
                "Sampling stopped before the frame rate was determined"
            );
        }
        info!("Sampling task ended (processed {} events)", event_count);
    }
}
