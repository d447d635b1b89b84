use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use stocklens_client::lens::{self, Action};
use stocklens_client::prelude::*;
use stocklens_client::render;
use tokio::runtime::Handle;

use crate::display;
use crate::markup::{self, Block};

pub const TITLE: &str = "Stock Info Fetcher - StockLens";

/// The window: form, fetch buttons and the output pane.
///
/// Fetches run on the tokio runtime and report back over the results
/// channel; the UI thread only ever polls. `last_render` is replaced once per
/// action and nowhere else, and `blocks` is its parsed form, kept in step by
/// `present` so frames only paint.
pub struct LensApp {
    form: FormInput,
    client: Client,
    endpoints: Endpoints,
    runtime: Handle,
    results_tx: Sender<Markup>,
    results_rx: Receiver<Markup>,
    in_flight: Option<Action>,
    last_render: Markup,
    blocks: Vec<Block>,
}

impl LensApp {
    pub fn new(client: Client, endpoints: Endpoints, runtime: Handle) -> Self {
        let (results_tx, results_rx) = crossbeam_channel::unbounded();
        let last_render = render::instructions();
        let blocks = markup::parse(last_render.as_str());
        Self {
            form: FormInput::default(),
            client,
            endpoints,
            runtime,
            results_tx,
            results_rx,
            in_flight: None,
            last_render,
            blocks,
        }
    }

    fn present(&mut self, markup: Markup) {
        self.blocks = markup::parse(markup.as_str());
        self.last_render = markup;
    }

    /// Validation failures are shown straight away; anything that needs the
    /// network goes to a task and locks the buttons until it reports back.
    fn dispatch(&mut self, action: Action, ctx: &egui::Context) {
        if self.in_flight.is_some() {
            return;
        }
        let request = match action.request(&self.form) {
            Ok(request) => request,
            Err(err) => {
                self.present(lens::failure(&err));
                return;
            }
        };

        self.in_flight = Some(action);
        let client = self.client.clone();
        let endpoints = self.endpoints.clone();
        let tx = self.results_tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let markup = lens::run(&client, &endpoints, request).await;
            if tx.send(markup).is_err() {
                log::warn!("window closed before {action:?} completed");
            }
            ctx.request_repaint();
        });
    }

    fn poll_results(&mut self) {
        if let Ok(markup) = self.results_rx.try_recv() {
            self.in_flight = None;
            self.present(markup);
        }
    }

    fn form_ui(&mut self, ui: &mut egui::Ui) -> Option<Action> {
        egui::Grid::new("inputs")
            .num_columns(2)
            .spacing([10.0, 10.0])
            .show(ui, |ui| {
                ui.label("API Key:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.form.api_key)
                        .password(true)
                        .desired_width(f32::INFINITY),
                );
                ui.end_row();

                ui.label("Stock Symbol:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.form.symbol)
                        .desired_width(f32::INFINITY),
                );
                ui.end_row();

                ui.label("From Date:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.form.from_date)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(f32::INFINITY),
                );
                ui.end_row();

                ui.label("To Date:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.form.to_date)
                        .hint_text("YYYY-MM-DD")
                        .desired_width(f32::INFINITY),
                );
                ui.end_row();
            });

        ui.add_space(10.0);

        let idle = self.in_flight.is_none();
        let mut clicked = None;
        ui.horizontal(|ui| {
            if ui
                .add_enabled(idle, egui::Button::new("Fetch Stock Quote"))
                .clicked()
            {
                clicked = Some(Action::Quote);
            }
            if ui
                .add_enabled(idle, egui::Button::new("Fetch Company News"))
                .clicked()
            {
                clicked = Some(Action::News);
            }
            if !idle {
                ui.spinner();
            }
        });
        clicked
    }
}

impl eframe::App for LensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();

        let mut action = None;
        egui::TopBottomPanel::top("form").show(ctx, |ui| {
            ui.add_space(10.0);
            action = self.form_ui(ui);
            ui.add_space(10.0);
        });

        if let Some(action) = action {
            self.dispatch(action, ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| display::show(ui, &self.blocks));
        });
    }
}
