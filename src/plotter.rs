use egui::{Color32, RichText};
use egui_plot::{Corner, Legend, Line, Plot, PlotBounds, PlotPoints};

use crate::config::{PlotColors, PlotConfig};
use crate::series::AxisChart;
use crate::utils::format_scientific;

fn rgb(c: [u8; 3]) -> Color32 {
    Color32::from_rgb(c[0], c[1], c[2])
}

fn series_colors(colors: &PlotColors) -> [Color32; 4] {
    [
        rgb(colors.value),
        rgb(colors.mean),
        rgb(colors.upper_band),
        rgb(colors.lower_band),
    ]
}

/// Line chart of one axis: reading values plus mean and ±σ reference lines.
///
/// The x axis is categorical (reading index, labelled by timestamp), so its
/// tick labels are hidden. The hovered reading is shown in a read-out row
/// under the chart rather than in a floating label.
pub struct AxisPlot<'a> {
    chart: &'a AxisChart,
    timestamps: &'a [String],
    config: &'a PlotConfig,
}

impl<'a> AxisPlot<'a> {
    pub fn new(chart: &'a AxisChart, timestamps: &'a [String], config: &'a PlotConfig) -> Self {
        Self {
            chart,
            timestamps,
            config,
        }
    }

    pub fn ui(&self, ui: &mut egui::Ui) {
        let text_color = rgb(self.config.colors.text);
        let colors = series_colors(&self.config.colors);
        let limits = self.chart.limits;
        let count = self.timestamps.len();

        let response = Plot::new(("axis_plot", self.chart.axis.title()))
            .height(self.config.plot_height)
            .legend(Legend::default().position(Corner::LeftTop))
            .show_axes([false, true])
            .x_axis_formatter(|_, _| String::new())
            .y_axis_formatter(|mark, _| format_scientific(mark.value))
            .show_x(false)
            .show_y(false)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                for ((name, data), color) in self.chart.series.named().into_iter().zip(colors) {
                    let points: Vec<[f64; 2]> = data
                        .iter()
                        .enumerate()
                        .map(|(i, &y)| [i as f64, y])
                        .collect();
                    plot_ui.line(Line::new(name, PlotPoints::from(points)).color(color).width(1.5));
                }

                // a flat {0,0} range (no baseline yet) is left to auto-fit
                if limits.has_span() {
                    let x_max = count.saturating_sub(1).max(1) as f64;
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                        [0.0, limits.min],
                        [x_max, limits.max],
                    ));
                }

                plot_ui.pointer_coordinate()
            });

        let hovered = response
            .inner
            .filter(|_| count > 0)
            .map(|p| p.x.round().clamp(0.0, (count - 1) as f64) as usize);

        ui.horizontal_wrapped(|ui| match hovered {
            Some(index) => {
                ui.label(RichText::new(&self.timestamps[index]).color(text_color).strong());
                for ((name, data), color) in self.chart.series.named().into_iter().zip(colors) {
                    if let Some(&value) = data.get(index) {
                        ui.label(RichText::new(format!("{}: {}", name, format_scientific(value))).color(color));
                    }
                }
            }
            None => {
                ui.label(RichText::new(" ").color(text_color));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_colors_follow_config() {
        let colors = PlotColors {
            value: [1, 2, 3],
            ..Default::default()
        };
        assert_eq!(series_colors(&colors)[0], Color32::from_rgb(1, 2, 3));
    }
}
