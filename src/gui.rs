// SchedScope - gui.rs
//
// Top-level eframe::App implementation for the chart window.
// Wires together the statistics sidebar, the chart panels, and the menu.

use crate::app::pipeline::RunOutput;
use crate::app::state::{AppState, ChartView};
use crate::ui;
use crate::util::constants;

/// The chart window.
pub struct SchedScopeApp {
    pub state: AppState,
}

impl SchedScopeApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SchedScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    let before = self.state.view;
                    ui.radio_value(&mut self.state.view, ChartView::WaitTimes, "Wait times");
                    ui.radio_value(&mut self.state.view, ChartView::Timeline, "Event timeline");
                    ui.separator();
                    ui.checkbox(&mut self.state.show_legend, "Show legend");
                    if before != self.state.view {
                        tracing::debug!(view = ?self.state.view, "Chart view changed");
                        ui.close_menu();
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(egui::RichText::new(self.state.status_line()).small());
        });

        egui::SidePanel::left("sidebar")
            .default_width(ui::theme::SIDEBAR_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                ui::panels::stats::render(ui, &mut self.state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.state.view.title());
            ui.add_space(4.0);
            match self.state.view {
                ChartView::WaitTimes => ui::panels::wait_chart::render(ui, &self.state),
                ChartView::Timeline => ui::panels::timeline::render(ui, &self.state),
            }
        });

        ui::panels::about::render(ctx, &mut self.state);
    }
}

/// Open the chart window and block until it is closed.
///
/// Failures (no display, no GPU backend) are logged and reported on stderr
/// but never propagated: the statistics have already been printed.
pub fn launch(run: RunOutput, width: f32, height: f32) {
    let title = format!("{} - {}", constants::APP_NAME, run.source.display());
    let state = AppState::new(run.source, run.analysis);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([width, height])
            .with_min_inner_size([constants::MIN_WINDOW_DIMENSION, constants::MIN_WINDOW_DIMENSION]),
        ..Default::default()
    };

    tracing::info!(tasks = state.task_count(), "Opening chart window");

    let result = eframe::run_native(
        constants::APP_NAME,
        native_options,
        Box::new(move |_cc| Ok(Box::new(SchedScopeApp::new(state)))),
    );

    if let Err(e) = result {
        tracing::warn!(error = %e, "Chart window unavailable");
        eprintln!("Charts unavailable: {e}");
    }
}
