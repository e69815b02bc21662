use eframe::egui;
use shared::display::TableView;

pub fn show_table(ui: &mut egui::Ui, view: &TableView) {
    ui.heading(&view.title);
    ui.add_space(6.0);

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new(("records_table", view.title.as_str()))
                .striped(true)
                .num_columns(view.headers.len())
                .spacing(egui::vec2(18.0, 6.0))
                .show(ui, |ui| {
                    for header in view.headers {
                        ui.label(egui::RichText::new(*header).strong());
                    }
                    ui.end_row();

                    for row in &view.rows {
                        for cell in row {
                            ui.label(cell);
                        }
                        ui.end_row();
                    }
                });

            if view.rows.is_empty() {
                ui.add_space(8.0);
                ui.weak("No records");
            }
        });
}
