use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{sequential_color, ColorMap};
use crate::data::pipeline::{CountryCount, StatusCount, YearCount};

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Launches by country
// ---------------------------------------------------------------------------

/// Horizontal bars, largest at the top, shaded by count on the YlOrRd scale.
pub fn country_chart(ui: &mut Ui, counts: &[CountryCount]) {
    let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
    let n = counts.len();

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new((n - i) as f64, c.count as f64)
                .name(&c.country)
                .fill(sequential_color(c.count, max))
                .width(0.8)
        })
        .collect();

    Plot::new("country_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Satellites launched")
        .show_axes([true, false])
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Launches"));
        });
}

// ---------------------------------------------------------------------------
// Launches per year
// ---------------------------------------------------------------------------

pub fn yearly_chart(ui: &mut Ui, counts: &[YearCount]) {
    let points: Vec<[f64; 2]> = counts
        .iter()
        .map(|y| [y.year as f64, y.count as f64])
        .collect();

    Plot::new("yearly_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Launch year")
        .y_axis_label("Count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(points.clone()))
                    .color(Color32::LIGHT_BLUE)
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .color(Color32::LIGHT_BLUE)
                    .radius(4.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Status breakdown
// ---------------------------------------------------------------------------

/// One bar per status, each in its own colour with a legend entry.
pub fn status_chart(ui: &mut Ui, counts: &[StatusCount], colors: Option<&ColorMap>) {
    Plot::new("status_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Count")
        .show_axes([false, true])
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, s) in counts.iter().enumerate() {
                let color = colors
                    .map(|cm| cm.color_for(&s.status))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let bar = Bar::new(i as f64, s.count as f64)
                    .name(format!("{}: {}", s.status, s.count))
                    .fill(color)
                    .width(0.7);
                plot_ui.bar_chart(BarChart::new(vec![bar]).color(color).name(&s.status));
            }
        });
}
