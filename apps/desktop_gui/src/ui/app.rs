use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{display::table_view, domain::Category};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::apply_view_event;
use crate::controller::reducer::{ViewBody, ViewEvent, ViewState};
use crate::ui::tables::show_table;

const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(111, 53, 53);
const ERROR_STROKE: egui::Color32 = egui::Color32::from_rgb(175, 96, 96);

pub struct DashboardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    api_url: String,
    view: ViewState,
    status: String,
    worker_failure: Option<String>,
}

impl DashboardApp {
    /// Builds the app and issues the initial fetch for the default tab.
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        api_url: impl Into<String>,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            api_url: api_url.into(),
            view: ViewState::default(),
            status: "Starting".to_string(),
            worker_failure: None,
        };
        app.apply(ViewEvent::SessionStarted);
        app
    }

    fn apply(&mut self, event: ViewEvent) {
        apply_view_event(&mut self.view, &self.cmd_tx, event);
    }

    fn select_category(&mut self, category: Category) {
        tracing::debug!(%category, "category selected");
        self.apply(ViewEvent::CategorySelected(category));
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::WorkerFailed(message) => {
                    self.status = message.clone();
                    self.worker_failure = Some(message);
                }
                completed @ UiEvent::FetchCompleted { .. } => {
                    if let Some(event) = completed.into_view_event() {
                        self.apply(event);
                    }
                }
            }
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("dashboard_header")
            .resizable(false)
            .frame(egui::Frame::new().inner_margin(egui::Margin::symmetric(12, 10)))
            .show(ctx, |ui| {
                ui.heading("E-Commerce Dashboard");
                ui.label(
                    egui::RichText::new(format!("API Gateway: {}", self.api_url))
                        .small()
                        .weak(),
                );
                ui.add_space(8.0);

                let mut selected = self.view.active_category();
                ui.horizontal(|ui| {
                    for category in Category::ALL {
                        if ui
                            .selectable_value(&mut selected, category, category.label())
                            .clicked()
                        {
                            self.select_category(category);
                        }
                    }
                });
            });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("dashboard_status")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.small(&self.status);
                    if let Some(count) = row_count_label(&self.view) {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.small(count);
                        });
                    }
                });
            });
    }

    fn show_error_banner(ui: &mut egui::Ui, message: &str) {
        egui::Frame::NONE
            .fill(ERROR_FILL)
            .stroke(egui::Stroke::new(1.0, ERROR_STROKE))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                });
            });
        ui.add_space(8.0);
    }

    fn show_body(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(failure) = &self.worker_failure {
                Self::show_error_banner(ui, failure);
            }
            if let Some(error) = self.view.error() {
                Self::show_error_banner(ui, error);
            }

            match self.view.body() {
                ViewBody::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading...");
                    });
                }
                ViewBody::Table(records) => show_table(ui, &table_view(records)),
                ViewBody::Empty => {}
            }
        });
    }
}

/// Row count of the table currently on screen; nothing while loading, after
/// a failure or before the active tab has data.
fn row_count_label(view: &ViewState) -> Option<String> {
    match view.body() {
        ViewBody::Table(records) if records.len() == 1 => Some("1 row".to_string()),
        ViewBody::Table(records) => Some(format!("{} rows", records.len())),
        ViewBody::Loading | ViewBody::Empty => None,
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_status_bar(ctx);
        self.show_body(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::{
        error::{FetchError, FetchFailure},
        protocol::{decode_records, endpoint_path, Records},
    };

    use super::*;

    fn fetch_ticket(cmd_rx: &Receiver<BackendCommand>) -> crate::controller::reducer::FetchTicket {
        let BackendCommand::FetchCategory { ticket } = cmd_rx.try_recv().expect("queued fetch");
        ticket
    }

    #[test]
    fn bootstrap_fetches_products_once() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (_ui_tx, ui_rx) = bounded(8);
        let app = DashboardApp::bootstrap(cmd_tx, ui_rx, "http://localhost:5000");

        assert_eq!(fetch_ticket(&cmd_rx).category, Category::Products);
        assert!(cmd_rx.try_recv().is_err());
        assert!(app.view.loading());
    }

    #[test]
    fn completion_events_drive_view_state() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let mut app = DashboardApp::bootstrap(cmd_tx, ui_rx, "http://localhost:5000");
        let _ = fetch_ticket(&cmd_rx);

        app.select_category(Category::Users);
        let ticket = fetch_ticket(&cmd_rx);
        ui_tx
            .send(UiEvent::Info("Backend worker ready".into()))
            .expect("send");
        ui_tx
            .send(UiEvent::FetchCompleted {
                ticket,
                result: Err(FetchFailure::new(
                    endpoint_path(Category::Users),
                    FetchError::Status(500),
                )),
            })
            .expect("send");

        app.process_ui_events();

        assert_eq!(app.status, "Backend worker ready");
        assert_eq!(
            app.view.error(),
            Some("Failed to fetch be-ecom-users/api/users: HTTP 500")
        );
        assert_eq!(app.view.body(), ViewBody::Empty);
        assert_eq!(app.view.records(), &Records::empty(Category::Products));
    }

    #[test]
    fn row_count_tracks_the_visible_table() {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let mut app = DashboardApp::bootstrap(cmd_tx, ui_rx, "http://localhost:5000");
        assert_eq!(row_count_label(&app.view), None);

        let products = decode_records(
            Category::Products,
            br#"[{"id":1,"name":"Widget"},{"id":2,"name":"Gadget"}]"#,
        )
        .expect("products");
        ui_tx
            .send(UiEvent::FetchCompleted {
                ticket: fetch_ticket(&cmd_rx),
                result: Ok(products),
            })
            .expect("send");
        app.process_ui_events();
        assert_eq!(row_count_label(&app.view).as_deref(), Some("2 rows"));

        // Switching tabs hides the old count until the new table arrives.
        app.select_category(Category::Orders);
        assert_eq!(row_count_label(&app.view), None);

        let orders = decode_records(Category::Orders, br#"[{"id":7}]"#).expect("orders");
        ui_tx
            .send(UiEvent::FetchCompleted {
                ticket: fetch_ticket(&cmd_rx),
                result: Ok(orders),
            })
            .expect("send");
        app.process_ui_events();
        assert_eq!(row_count_label(&app.view).as_deref(), Some("1 row"));

        app.select_category(Category::Users);
        ui_tx
            .send(UiEvent::FetchCompleted {
                ticket: fetch_ticket(&cmd_rx),
                result: Err(FetchFailure::new(
                    endpoint_path(Category::Users),
                    FetchError::Status(500),
                )),
            })
            .expect("send");
        app.process_ui_events();
        assert_eq!(row_count_label(&app.view), None);
    }
}
