use eframe::egui::{self, Color32, CornerRadius, Margin, RichText};

use crate::app::app_core::SacDmApp;
use crate::plotter::AxisPlot;
use crate::status::DeviceStatus;

/// Status box, the three axis charts side by side, and the empty-data notice.
/// Draws nothing while no device is selected.
pub fn render_main_panel(app: &mut SacDmApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let readings = app.feed.window.as_slice();
        let Some(view) = app.panel.view(readings) else {
            return;
        };

        ui.horizontal(|ui| {
            render_status_box(ui, view.status);
            ui.add_space(10.0);
            ui.heading(format!("Dispositivo {}", view.device_id));
        });
        ui.add_space(10.0);

        let plot_config = &app.config.plot;
        ui.columns(view.charts.len(), |columns| {
            for (column, chart) in columns.iter_mut().zip(&view.charts) {
                egui::Frame::group(column.style()).show(column, |ui| {
                    ui.heading(chart.axis.title());
                    AxisPlot::new(chart, &view.timestamps, plot_config).ui(ui);
                });
            }
        });

        if let Some(message) = view.empty_notice {
            ui.add_space(12.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(message).italics().size(16.0));
            });
        }
    });
}

fn render_status_box(ui: &mut egui::Ui, status: DeviceStatus) {
    egui::Frame::new()
        .fill(status.fill_color())
        .corner_radius(CornerRadius::same(6))
        .inner_margin(Margin::same(10))
        .show(ui, |ui| {
            ui.label(
                RichText::new(status.label())
                    .color(Color32::WHITE)
                    .strong()
                    .size(18.0),
            );
        });
}
