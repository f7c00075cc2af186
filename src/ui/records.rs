use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::pipeline::RecordRow;

// ---------------------------------------------------------------------------
// Satellite detail cards
// ---------------------------------------------------------------------------

pub fn record_cards(ui: &mut Ui, records: &[RecordRow]) {
    if records.is_empty() {
        ui.weak("No satellites match this selection.");
        return;
    }

    ScrollArea::vertical()
        .id_salt("record_cards")
        .max_height(400.0)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for (i, record) in records.iter().enumerate() {
                egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                    ui.set_width(ui.available_width());
                    let name = if record.name.is_empty() { "(unnamed)" } else { record.name.as_str() };
                    ui.label(RichText::new(name).strong().size(16.0));
                    egui::Grid::new(("card", i))
                        .num_columns(2)
                        .show(ui, |ui: &mut Ui| {
                            field(ui, "Launch Date", &record.launch_date);
                            field(ui, "Flight Ended", &record.flight_ended);
                            field(ui, "NORAD ID", &record.norad_id);
                        });
                });
                ui.add_space(4.0);
            }
        });
}

fn field(ui: &mut Ui, label: &str, value: &str) {
    ui.weak(label);
    ui.label(value);
    ui.end_row();
}
