use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Receiver;
use eframe::{egui, Frame};
use log::info;
use tokio::runtime::Handle;

use super::state::FeedState;
use crate::api::BaselineSource;
use crate::config::AppConfig;
use crate::mqtt::FeedSignals;
use crate::panel::SacDmDevicePanel;
use crate::status::evaluator_from_config;
use crate::types::{DeviceId, Reading};

pub struct SacDmApp {
    pub panel: SacDmDevicePanel,
    pub feed: FeedState,
    pub feed_signals: FeedSignals,
    pub config: AppConfig,

    /// Value of the device field in the top bar, applied on demand.
    pub device_input: u32,
}

impl SacDmApp {
    pub fn new(
        config: AppConfig,
        runtime: Handle,
        source: Arc<dyn BaselineSource>,
        reading_receiver: Receiver<Reading>,
        feed_signals: FeedSignals,
    ) -> Self {
        let mut panel = SacDmDevicePanel::new(
            runtime,
            source,
            config.api.poll_interval(),
            evaluator_from_config(&config.status),
        );
        panel.set_device(config.device.initial_device());

        info!(
            "Viewer started for device {}",
            config.device.initial_device().map_or("-".to_string(), |d| d.to_string())
        );

        Self {
            panel,
            feed: FeedState::new(reading_receiver, config.plot.max_readings),
            feed_signals,
            device_input: config.device.initial_id,
            config,
        }
    }

    /// Switches the panel to another device; readings of the old one are dropped.
    pub fn select_device(&mut self, id: u32) {
        let device = DeviceId::new(id);
        if device == self.panel.device_id() {
            return;
        }

        info!("Switching to device {}", id);
        self.feed.window.clear();
        self.panel.set_device(device);
    }

    fn apply_visuals(&self, ctx: &egui::Context) {
        let [r, g, b] = self.config.plot.colors.text;
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(r, g, b));
        ctx.set_visuals(visuals);
    }
}

impl eframe::App for SacDmApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.apply_visuals(ctx);

        self.feed.drain(self.panel.device_id());
        self.panel.pump();

        super::ui::render_status_bar(self, ctx);
        super::ui::render_main_panel(self, ctx);

        ctx.request_repaint_after(Duration::from_millis(150));
    }
}
