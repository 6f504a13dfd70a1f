//! Periodic baseline refresh for one device.
//!
//! The loop lives on the tokio runtime and hands successful results to the
//! UI thread through a channel; the UI commits them on its next frame.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use log::{debug, error, info};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::api::BaselineSource;
use crate::types::{Baseline, DeviceId};

/// A baseline fetched for a specific device.
#[derive(Debug, Clone)]
pub struct BaselineUpdate {
    pub device_id: DeviceId,
    pub baseline: Baseline,
}

/// Handle to a running poll loop. Dropping it stops the loop.
pub struct BaselinePoller {
    device_id: DeviceId,
    cancel_token: CancellationToken,
    handle: JoinHandle<()>,
}

impl BaselinePoller {
    /// Fetches immediately, then once per `period` until stopped.
    pub fn spawn(
        runtime: &Handle,
        source: Arc<dyn BaselineSource>,
        device_id: DeviceId,
        period: Duration,
        updates: Sender<BaselineUpdate>,
    ) -> Self {
        let cancel_token = CancellationToken::new();
        let task_token = cancel_token.clone();

        let handle = runtime.spawn(async move {
            info!("Baseline polling started for device {} every {:?}", device_id, period);
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                // an in-flight request is abandoned on cancellation
                let result = tokio::select! {
                    _ = task_token.cancelled() => break,
                    result = source.fetch_baseline(device_id) => result,
                };

                match result {
                    Ok(baseline) => {
                        debug!("Baseline received for device {}", device_id);
                        if updates.send(BaselineUpdate { device_id, baseline }).is_err() {
                            debug!("Baseline receiver dropped, stopping poll loop");
                            break;
                        }
                    }
                    Err(e) => error!("Failed to load baseline for device {}: {}", device_id, e),
                }
            }

            info!("Baseline polling stopped for device {}", device_id);
        });

        Self {
            device_id,
            cancel_token,
            handle,
        }
    }

    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    pub fn stop(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for BaselinePoller {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}
