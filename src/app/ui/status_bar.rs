use eframe::egui::{self, Color32};

use crate::app::app_core::SacDmApp;

fn feed_label(connected: bool) -> (&'static str, Color32) {
    if connected {
        ("Leituras conectadas", Color32::from_rgb(0, 150, 0))
    } else {
        ("Leituras desconectadas", Color32::from_rgb(150, 0, 0))
    }
}

fn baseline_label(loaded: bool) -> &'static str {
    if loaded {
        "Linha de base: carregada"
    } else {
        "Linha de base: pendente"
    }
}

pub fn render_status_bar(app: &mut SacDmApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("status_bar")
        .min_height(40.0)
        .show(ctx, |ui| {
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.label("Dispositivo:");
                let response = ui.add(egui::DragValue::new(&mut app.device_input).range(0..=u32::MAX));
                if ui.button("Aplicar").clicked() || response.lost_focus() {
                    app.select_device(app.device_input);
                }

                ui.separator();

                let (feed_text, feed_color) = feed_label(app.feed_signals.is_connected());
                ui.colored_label(feed_color, feed_text);

                ui.separator();

                if app.feed.window.is_empty() {
                    ui.label("aguardando leituras...");
                } else {
                    ui.label(format!("Leituras: {}", app.feed.window.len()));
                }

                ui.separator();
                ui.label(baseline_label(app.panel.baseline().is_some()));

                ui.separator();
                ui.label(format!("Atualização: {:.1}s", app.config.api.poll_interval().as_secs_f64()));
            });
            ui.add_space(5.0);
        });
}
