use eframe::egui::{self, ScrollArea, Ui};

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{charts, panels, records};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SatelliteExplorerApp {
    pub state: AppState,
}

impl SatelliteExplorerApp {
    /// Load the configured dataset once; a failure is shown in the top bar.
    pub fn new(config: &Config) -> Self {
        let mut state = AppState::default();
        state.load(&config.data_path);
        Self { state }
    }
}

impl eframe::App for SatelliteExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: selections ----
        egui::SidePanel::left("selection_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the four views ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| views(ui, &self.state));
        });
    }
}

fn views(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a launch dataset to begin  (File → Open…)");
        });
        return;
    }
    let out = &state.output;
    let sel = &state.selection;

    ui.heading("Global Satellite Launch Explorer");
    ui.add_space(8.0);

    ui.heading("1. Satellite launches by country");
    charts::country_chart(ui, &out.country_counts);

    let Some(country) = sel.country.as_deref() else {
        return;
    };
    ui.add_space(8.0);
    ui.heading(format!("2. Year-wise satellite launches: {country}"));
    if out.yearly_counts.is_empty() {
        ui.weak("No launches with a known date.");
        return;
    }
    charts::yearly_chart(ui, &out.yearly_counts);

    let Some(year) = sel.year else {
        return;
    };
    ui.add_space(8.0);
    ui.heading(format!("3. Satellite status in {year} ({country})"));
    charts::status_chart(ui, &out.status_counts, state.status_colors.as_ref());

    let Some(status) = sel.status.as_deref() else {
        return;
    };
    ui.add_space(8.0);
    ui.heading(format!("4. {status} satellites launched in {year} by {country}"));
    records::record_cards(ui, &out.records);
}
