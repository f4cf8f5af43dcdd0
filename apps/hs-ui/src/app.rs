use chrono::{DateTime, Local};
use std::sync::Arc;

use crate::views::{AnalyticsView, DetailView, PlotView};
use hs_app::{HttpSolver, RequestController, SolverConfig};
use hs_core::ScenarioDraft;
use hs_present::{Effect, ResultView, SettlePolicy, ViewTab};

pub struct HospitalSitingApp {
    controller: Option<RequestController>,
    endpoint: String,
    startup_error: Option<String>,
    draft: ScenarioDraft,
    last_received: Option<DateTime<Local>>,
    plot_view: PlotView,
    analytics_view: AnalyticsView,
    detail_view: DetailView,
}

impl HospitalSitingApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let ctx = cc.egui_ctx.clone();
        let connected = SolverConfig::load(None).and_then(|config| {
            let solver = HttpSolver::new(&config)?;
            Ok((config.endpoint(), solver))
        });

        let (controller, endpoint, startup_error) = match connected {
            Ok((endpoint, solver)) => {
                tracing::info!(%endpoint, "solver configured");
                let controller =
                    RequestController::new(Arc::new(solver), SettlePolicy::LastSettledWins)
                        .with_notifier(move || ctx.request_repaint());
                (Some(controller), endpoint, None)
            }
            Err(e) => {
                tracing::error!(error = %e, "solver configuration failed");
                (None, String::new(), Some(e.to_string()))
            }
        };

        let draft = controller
            .as_ref()
            .map(|c| c.session().draft().clone())
            .unwrap_or_default();

        Self {
            controller,
            endpoint,
            startup_error,
            draft,
            last_received: None,
            plot_view: PlotView::default(),
            analytics_view: AnalyticsView::default(),
            detail_view: DetailView::default(),
        }
    }

    fn poll_controller(&mut self) {
        if let Some(controller) = self.controller.as_mut() {
            for effect in controller.poll() {
                if let Effect::Stored(_) = effect {
                    self.last_received = Some(Local::now());
                }
            }
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Scenario");
        ui.separator();

        let mut changed = false;
        egui::Grid::new("scenario_form")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Grid size (m):");
                changed |= ui.text_edit_singleline(&mut self.draft.m).changed();
                ui.end_row();

                ui.label("Neighborhoods:");
                changed |= ui
                    .text_edit_singleline(&mut self.draft.num_neighborhoods)
                    .changed();
                ui.end_row();

                ui.label("Hospitals (K):");
                changed |= ui.text_edit_singleline(&mut self.draft.k).changed();
                ui.end_row();

                ui.label("Random seed:");
                changed |= ui.text_edit_singleline(&mut self.draft.random_seed).changed();
                ui.end_row();
            });

        let Some(controller) = self.controller.as_mut() else {
            if let Some(error) = &self.startup_error {
                ui.separator();
                ui.colored_label(egui::Color32::RED, format!("Solver unavailable: {}", error));
            }
            return;
        };

        if changed {
            controller.edit_draft(self.draft.clone());
        }

        ui.add_space(8.0);
        let submitting = controller.session().is_submitting();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!submitting, egui::Button::new("Run simulation"))
                .clicked()
            {
                controller.submit();
            }
            if ui
                .add_enabled(submitting, egui::Button::new("Cancel"))
                .clicked()
            {
                controller.cancel();
            }
        });

        let errors = controller.session().validation_errors();
        if !errors.is_empty() {
            ui.separator();
            for error in errors {
                ui.colored_label(egui::Color32::RED, error);
            }
        }

        ui.separator();
        ui.small(format!("Solver: {}", self.endpoint));
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        let Some(controller) = self.controller.as_ref() else {
            return;
        };
        let session = controller.session();
        if !session.is_submitting() && session.error().is_none() && self.last_received.is_none() {
            return;
        }

        ui.separator();
        ui.group(|ui| {
            ui.heading("Status");
            if session.is_submitting() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Waiting for the solver...");
                });
            }
            if let Some(error) = session.error() {
                ui.colored_label(egui::Color32::RED, error);
            }
            if let Some(at) = &self.last_received {
                ui.label(format!("Last result received at {}", at.format("%H:%M:%S")));
            }
        });
    }
}

impl eframe::App for HospitalSitingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_controller();

        egui::SidePanel::left("scenario_panel")
            .default_width(260.0)
            .show(ctx, |ui| {
                self.show_form(ui);
                self.show_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(controller) = self.controller.as_mut() else {
                ui.label("Configure SOLVER_BASE_URL and restart to run simulations");
                return;
            };

            let active = controller.session().active_tab();
            ui.horizontal(|ui| {
                for tab in ViewTab::ALL {
                    if ui.selectable_label(active == tab, tab.label()).clicked() {
                        controller.select_tab(tab);
                    }
                }
            });
            ui.separator();

            match controller.session().active_view() {
                Some(ResultView::Plot(scene)) => self.plot_view.show(ui, &scene),
                Some(ResultView::Analytics(analytics)) => self.analytics_view.show(ui, &analytics),
                Some(ResultView::Detail(rows)) => self.detail_view.show(ui, &rows),
                None => {
                    ui.label("Run a simulation to see results");
                }
            }
        });
    }
}
