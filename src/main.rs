mod catalog;
mod editor;
mod fields;
mod graph;
mod layout;
mod node_kind;
mod plan;
mod schema;
mod sizing;
mod submit;
mod vars;

use std::sync::mpsc::{self, Receiver};

use eframe::egui;

use editor::PipelineEditor;
use graph::PipelineGraph;
use node_kind::NodeKind;
use submit::PipelineAnalysis;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Pipeline Builder",
        native_options,
        Box::new(|_cc| Ok(Box::new(PipelineApp::default()))),
    )
}

#[derive(Default)]
struct PipelineApp {
    graph: PipelineGraph,
    editor: PipelineEditor,
    /// How many nodes have been placed, used to stagger spawn positions.
    placed_count: usize,
    /// Receiver for the in-flight submission, if any.
    submit_rx: Option<Receiver<Result<PipelineAnalysis, String>>>,
    submit_result: Option<Result<PipelineAnalysis, String>>,
}

impl PipelineApp {
    fn spawn_position(&mut self) -> (f32, f32) {
        let n = self.placed_count;
        self.placed_count += 1;
        (
            40.0 + (n % 6) as f32 * 140.0,
            40.0 + ((n / 6) % 4) as f32 * 150.0,
        )
    }

    fn start_submit(&mut self) {
        let url = submit::parse_url();
        let graph = self.graph.clone();
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let result = submit::submit_pipeline(&url, &graph).map_err(|e| format!("{e:#}"));
            if let Err(ref message) = result {
                log::error!("pipeline submission failed: {message}");
            }
            let _ = tx.send(result);
        });
        self.submit_rx = Some(rx);
    }
}

impl eframe::App for PipelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll the submission worker.
        if let Some(rx) = self.submit_rx.take() {
            match rx.try_recv() {
                Ok(result) => self.submit_result = Some(result),
                Err(mpsc::TryRecvError::Empty) => {
                    self.submit_rx = Some(rx);
                    ctx.request_repaint();
                }
                Err(mpsc::TryRecvError::Disconnected) => {
                    self.submit_result = Some(Err("submission worker vanished".to_string()));
                }
            }
        }

        egui::TopBottomPanel::top("palette").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Pipeline Nodes");
            ui.horizontal_wrapped(|ui| {
                for kind in NodeKind::ALL {
                    if ui.button(catalog::schema_for(kind).title).clicked() {
                        let position = self.spawn_position();
                        self.graph.add_node(kind, position);
                    }
                }
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("submit").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                if self.submit_rx.is_some() {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Validating pipeline...");
                    });
                } else if ui.button("Submit Pipeline").clicked() {
                    self.start_submit();
                }
            });
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.editor.show(ui, &mut self.graph);
        });

        let mut close_result = false;
        if let Some(result) = &self.submit_result {
            egui::Window::new("Pipeline Analysis")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    match result {
                        Ok(analysis) => ui.label(analysis.summary()),
                        Err(message) => ui.colored_label(
                            egui::Color32::LIGHT_RED,
                            format!("Error: {message}"),
                        ),
                    };
                    ui.add_space(6.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("OK").clicked() {
                            close_result = true;
                        }
                    });
                });
        }
        if close_result {
            self.submit_result = None;
        }
    }
}
