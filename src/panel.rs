use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, warn};
use tokio::runtime::Handle;

use crate::api::BaselineSource;
use crate::poller::{BaselinePoller, BaselineUpdate};
use crate::series::{build_axis_chart, AxisChart};
use crate::status::{DeviceStatus, StatusEvaluator};
use crate::types::{Axis, Baseline, DeviceId, Reading};

pub const EMPTY_DATA_MESSAGE: &str = "Nenhum dado encontrado para o dispositivo selecionado";

/// What the device panel shows for one frame.
#[derive(Debug, Clone)]
pub struct PanelView {
    pub device_id: DeviceId,
    pub status: DeviceStatus,
    pub charts: Vec<AxisChart>,
    /// Category labels of the x axis, one per reading.
    pub timestamps: Vec<String>,
    pub empty_notice: Option<&'static str>,
}

/// Baseline-aware chart panel for one device.
///
/// Owns the baseline and the poll loop feeding it. Readings are borrowed from
/// the caller on every frame and never stored.
pub struct SacDmDevicePanel {
    runtime: Handle,
    source: Arc<dyn BaselineSource>,
    poll_interval: Duration,
    evaluator: Box<dyn StatusEvaluator>,

    device_id: Option<DeviceId>,
    baseline: Option<Baseline>,
    poller: Option<BaselinePoller>,
    updates_tx: Sender<BaselineUpdate>,
    updates_rx: Receiver<BaselineUpdate>,
    last_status: Option<DeviceStatus>,
}

impl SacDmDevicePanel {
    pub fn new(
        runtime: Handle,
        source: Arc<dyn BaselineSource>,
        poll_interval: Duration,
        evaluator: Box<dyn StatusEvaluator>,
    ) -> Self {
        let (updates_tx, updates_rx) = crossbeam_channel::unbounded();
        Self {
            runtime,
            source,
            poll_interval,
            evaluator,
            device_id: None,
            baseline: None,
            poller: None,
            updates_tx,
            updates_rx,
            last_status: None,
        }
    }

    pub fn device_id(&self) -> Option<DeviceId> {
        self.device_id
    }

    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }

    pub fn is_polling(&self) -> bool {
        self.poller
            .as_ref()
            .is_some_and(|p| !p.is_cancelled() && !p.is_finished())
    }

    /// Selects the device to follow, restarting the poll loop when it changes.
    ///
    /// The previous loop is cancelled before the new one starts. `None` stops
    /// polling altogether.
    pub fn set_device(&mut self, device_id: Option<DeviceId>) {
        if device_id == self.device_id && (device_id.is_none() || self.is_polling()) {
            return;
        }

        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
        self.device_id = device_id;
        self.last_status = None;

        if let Some(id) = device_id {
            self.poller = Some(BaselinePoller::spawn(
                &self.runtime,
                Arc::clone(&self.source),
                id,
                self.poll_interval,
                self.updates_tx.clone(),
            ));
        }
    }

    /// Stops polling and deselects the device. Nothing is rendered or
    /// committed after this returns.
    pub fn unmount(&mut self) {
        if let Some(poller) = self.poller.take() {
            info!("Unmounting panel for device {}", poller.device_id());
            poller.stop();
        }
        self.device_id = None;
        self.last_status = None;
        while self.updates_rx.try_recv().is_ok() {}
    }

    /// Commits baselines delivered since the last frame. Returns whether the
    /// stored baseline changed.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Ok(update) = self.updates_rx.try_recv() {
            if Some(update.device_id) != self.device_id {
                debug!("Discarding stale baseline for device {}", update.device_id);
                continue;
            }
            if self.baseline.as_ref() != Some(&update.baseline) {
                changed = true;
            }
            self.baseline = Some(update.baseline);
        }
        changed
    }

    /// Builds the frame for `readings`; `None` when no device is selected.
    pub fn view(&mut self, readings: &[Reading]) -> Option<PanelView> {
        let device_id = self.device_id?;
        let baseline = self.baseline.as_ref();

        let status = self.evaluator.evaluate(readings, baseline);
        let charts = Axis::ALL
            .iter()
            .map(|&axis| build_axis_chart(axis, readings, baseline))
            .collect();
        self.track_status(device_id, status);

        Some(PanelView {
            device_id,
            status,
            charts,
            timestamps: readings.iter().map(|r| r.timestamp.clone()).collect(),
            empty_notice: readings.is_empty().then_some(EMPTY_DATA_MESSAGE),
        })
    }

    fn track_status(&mut self, device_id: DeviceId, status: DeviceStatus) {
        let previous = self.last_status.replace(status);
        match (previous, status) {
            (Some(prev), now) if prev == now => {}
            (Some(DeviceStatus::Ok), DeviceStatus::Failed) => {
                warn!("Device {} changed from Ok to {}", device_id, status.label())
            }
            (Some(prev), now) => info!("Device {} status {} -> {}", device_id, prev.label(), now.label()),
            (None, _) => {}
        }
    }
}

impl Drop for SacDmDevicePanel {
    fn drop(&mut self) {
        self.unmount();
    }
}
