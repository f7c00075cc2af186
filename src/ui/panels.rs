use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::pipeline::RecordRow;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – cascading selectors
// ---------------------------------------------------------------------------

/// Render the left panel: country → year → status pickers and the country table.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Drill down");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // Clone the domains so the pickers can mutate state.
    let countries: Vec<String> = state
        .output
        .country_counts
        .iter()
        .map(|c| c.country.clone())
        .collect();
    let years: Vec<i32> = state.output.yearly_counts.iter().map(|y| y.year).collect();
    let statuses: Vec<String> = state
        .output
        .status_counts
        .iter()
        .map(|s| s.status.clone())
        .collect();

    ui.strong("Country");
    let current = state.selection.country.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("country")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for country in &countries {
                if ui.selectable_label(current == *country, country).clicked() {
                    state.select_country(country.clone());
                }
            }
        });
    ui.add_space(4.0);

    ui.strong("Year");
    if years.is_empty() {
        ui.weak("No dated launches");
    } else {
        let current = state.selection.year;
        egui::ComboBox::from_id_salt("year")
            .selected_text(current.map(|y| y.to_string()).unwrap_or_default())
            .width(ui.available_width())
            .show_ui(ui, |ui: &mut Ui| {
                for &year in &years {
                    if ui
                        .selectable_label(current == Some(year), year.to_string())
                        .clicked()
                    {
                        state.select_year(year);
                    }
                }
            });
    }
    ui.add_space(4.0);

    ui.strong("Status");
    if statuses.is_empty() {
        ui.weak("–");
    } else {
        let current = state.selection.status.clone().unwrap_or_default();
        egui::ComboBox::from_id_salt("status")
            .selected_text(&current)
            .width(ui.available_width())
            .show_ui(ui, |ui: &mut Ui| {
                for status in &statuses {
                    let mut text = RichText::new(status);
                    if let Some(cm) = &state.status_colors {
                        text = text.color(cm.color_for(status));
                    }
                    if ui.selectable_label(current == *status, text).clicked() {
                        state.select_status(status.clone());
                    }
                }
            });
    }
    ui.separator();

    country_table(ui, state);
}

/// Country ranking table; clicking a row selects that country.
fn country_table(ui: &mut Ui, state: &mut AppState) {
    let rows = state.output.country_counts.clone();
    let selected = state.selection.country.clone();
    let mut clicked = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .column(Column::remainder())
                .column(Column::auto())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Country");
                    });
                    header.col(|ui| {
                        ui.strong("Launches");
                    });
                })
                .body(|mut body| {
                    for row in &rows {
                        body.row(18.0, |mut tr| {
                            tr.col(|ui| {
                                let is_selected = selected.as_deref() == Some(row.country.as_str());
                                if ui.selectable_label(is_selected, &row.country).clicked() {
                                    clicked = Some(row.country.clone());
                                }
                            });
                            tr.col(|ui| {
                                ui.label(row.count.to_string());
                            });
                        });
                    }
                });
        });

    if let Some(country) = clicked {
        state.select_country(country);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = !state.output.records.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export records…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let source = state
                .source
                .as_deref()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!("{} launches loaded {source}", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open satellite launches")
        .add_filter("Supported files", &["csv", "tsv", "tab", "json", "parquet", "pq"])
        .add_filter("Delimited text", &["csv", "tsv", "tab"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}

fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export records")
        .add_filter("CSV", &["csv"])
        .set_file_name("satellites.csv")
        .save_file();

    let Some(path) = file else {
        return;
    };
    match export_records(&path, &state.output.records) {
        Ok(()) => {
            log::info!("Exported {} records to {}", state.output.records.len(), path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export records: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

/// Write record cards as CSV with their display labels as headers.
pub fn export_records(path: &Path, records: &[RecordRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for record in records {
        writer.serialize(record).context("writing record")?;
    }
    writer.flush().context("flushing export")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![RecordRow {
            name: "SAT".into(),
            launch_date: "Jan 02, 2020".into(),
            flight_ended: "—".into(),
            norad_id: "123".into(),
        }];
        export_records(&path, &rows).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "Name,Launch Date,Flight Ended,NORAD ID\nSAT,\"Jan 02, 2020\",—,123\n"
        );
    }

    #[test]
    fn test_export_to_bad_path_fails() {
        let err = export_records(Path::new("/no/such/dir/out.csv"), &[]).unwrap_err();
        assert!(format!("{err:#}").contains("creating"));
    }
}
