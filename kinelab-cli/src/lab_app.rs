//! Interactive lab window
//!
//! Three tabs: the formulas, the live simulation and the quiz. When started
//! with a lab file, the file is watched and edits are applied live.

use eframe::egui;
use kinelab_core::kinematics::Formula;
use kinelab_core::mathtext::{parse_math_text, to_plain_text};
use kinelab_core::{
    map_to_scene, quiz_cards, track_marks, CardStatus, FrameScheduler, HaltReason,
    KinematicsEngine, LabConfig, QuizCard, SceneParams, SimulationDriver, TickHandle,
};
use notify::{Event, RecommendedWatcher, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;

/// Open the lab window and block until it is closed
pub fn run(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &config_path {
        Some(path) => LabConfig::load(path)?,
        None => LabConfig::default(),
    };
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "KineLab",
        options,
        Box::new(move |cc| Ok(Box::new(LabApp::new(config, config_path, cc)))),
    )?;
    Ok(())
}

/// Grants frames by asking egui for a repaint
#[derive(Debug, Default)]
struct RepaintScheduler {
    next_id: u64,
    requested: Option<TickHandle>,
}

impl FrameScheduler for RepaintScheduler {
    fn request_tick(&mut self) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.requested = Some(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        if self.requested == Some(handle) {
            self.requested = None;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Theory,
    Simulation,
    Quiz,
}

pub struct LabApp {
    config: LabConfig,
    config_path: Option<PathBuf>,
    driver: SimulationDriver<RepaintScheduler>,
    v0: f64,
    a: f64,
    tab: Tab,
    wheel_angle: f32,
    cards: Vec<QuizCard>,
    last_load_error: Option<String>,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl LabApp {
    fn new(config: LabConfig, config_path: Option<PathBuf>, _cc: &eframe::CreationContext<'_>) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut watcher = None;
        if let Some(path) = &config_path {
            watcher = notify::recommended_watcher(move |res| {
                let _ = tx.send(res);
            })
            .ok();
            if let Some(w) = watcher.as_mut() {
                if let Err(e) = w.watch(path, notify::RecursiveMode::NonRecursive) {
                    log::warn!("not watching {}: {}", path.display(), e);
                }
            }
        }

        Self {
            driver: new_driver(&config),
            v0: config.parameters.initial_velocity,
            a: config.parameters.acceleration,
            config,
            config_path,
            tab: Tab::Simulation,
            wheel_angle: 0.0,
            cards: quiz_cards(),
            last_load_error: None,
            file_watcher: watcher,
            file_receiver: rx,
        }
    }

    fn check_file_changes(&mut self) {
        let mut needs_reload = false;
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    paths,
                    ..
                }) => {
                    if let Some(path) = &self.config_path {
                        needs_reload |= paths.iter().any(|p| p.ends_with(path) || path.ends_with(p));
                    }
                }
                Ok(_) => {}
                Err(e) => log::warn!("file watcher error: {}", e),
            }
        }

        if needs_reload {
            self.reload_config();
        }
    }

    fn reload_config(&mut self) {
        let Some(path) = &self.config_path else {
            return;
        };
        match LabConfig::load(path) {
            Ok(config) => {
                if config.engine != self.config.engine {
                    self.driver = new_driver(&config);
                } else if config.parameters != self.config.parameters {
                    self.driver.set_parameters(
                        config.parameters.initial_velocity,
                        config.parameters.acceleration,
                    );
                }
                self.v0 = config.parameters.initial_velocity;
                self.a = config.parameters.acceleration;
                self.config = config;
                self.last_load_error = None;
            }
            Err(e) => {
                log::warn!("keeping previous config: {}", e);
                self.last_load_error = Some(e.to_string());
            }
        }
    }

    fn deliver_frame(&mut self, ctx: &egui::Context) {
        let Some(handle) = self.driver.scheduler_mut().requested.take() else {
            return;
        };
        let now = ctx.input(|i| i.time);
        if let Some(values) = self.driver.on_frame(handle, now) {
            let scene = self.scene_for(values.position, values.velocity);
            if let Some(period) = scene.rotation.period {
                let dt = ctx.input(|i| i.stable_dt);
                self.wheel_angle += scene.rotation.direction.sign() * dt * std::f32::consts::TAU
                    / period as f32;
                self.wheel_angle %= std::f32::consts::TAU;
            }
        }
    }

    fn scene_for(&self, position: f64, velocity: f64) -> SceneParams {
        map_to_scene(
            position,
            velocity,
            self.config.engine.track_half_range,
            &self.config.scene,
        )
    }

    fn theory_ui(&self, ui: &mut egui::Ui) {
        for formula in Formula::ALL {
            ui.group(|ui| {
                ui.label(egui::RichText::new(formula.title()).strong().size(16.0));
                ui.label(
                    egui::RichText::new(to_plain_text(&parse_math_text(formula.markup())))
                        .monospace()
                        .size(18.0),
                );
                ui.label(formula.description());
            });
            ui.add_space(6.0);
        }
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let v0 = ui.add(
                egui::Slider::new(&mut self.v0, -30.0..=30.0)
                    .step_by(1.0)
                    .text("v₀ (m/s)"),
            );
            let a = ui.add(
                egui::Slider::new(&mut self.a, -10.0..=10.0)
                    .step_by(0.5)
                    .text("a (m/s²)"),
            );
            if v0.changed() || a.changed() {
                self.driver.set_parameters(self.v0, self.a);
            }
        });

        ui.horizontal(|ui| {
            let running = self.driver.engine().is_running();
            if ui.button(if running { "⏸ Pause" } else { "▶ Start" }).clicked() {
                self.driver.toggle();
            }
            if ui.button("⏮ Reset").clicked() {
                self.driver.reset();
                self.wheel_angle = 0.0;
            }
            if self.driver.engine().halt_reason() == Some(HaltReason::Boundary) {
                ui.label(egui::RichText::new("End of track").color(egui::Color32::GOLD));
            }
        });
    }

    fn simulation_ui(&mut self, ui: &mut egui::Ui) {
        self.controls_ui(ui);
        ui.separator();

        let values = self.driver.snapshot();
        let scene = self.scene_for(values.position, values.velocity);

        ui.horizontal(|ui| {
            readout(ui, "time t", format!("{:.2} s", values.time));
            readout(ui, "displacement Δs", format!("{:.2} m", values.position));
            readout(ui, "velocity v", format!("{:.2} m/s", values.velocity));
        });

        // speed gauge
        let (gauge, _) =
            ui.allocate_exact_size(egui::vec2(ui.available_width(), 8.0), egui::Sense::hover());
        let painter = ui.painter_at(gauge);
        painter.rect_filled(gauge, 4.0, egui::Color32::from_gray(60));
        let mut filled = gauge;
        filled.set_width(gauge.width() * (scene.speed_bar_percent / 100.0) as f32);
        let gauge_color = if values.velocity >= 0.0 {
            egui::Color32::from_rgb(16, 185, 129)
        } else {
            egui::Color32::from_rgb(239, 68, 68)
        };
        painter.rect_filled(filled, 4.0, gauge_color);

        ui.add_space(8.0);
        self.draw_track(ui, &scene);
    }

    fn draw_track(&self, ui: &mut egui::Ui, scene: &SceneParams) {
        let (rect, _) =
            ui.allocate_exact_size(egui::vec2(ui.available_width(), 180.0), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 6.0, egui::Color32::from_rgb(30, 41, 59));

        let track_y = rect.bottom() - 50.0;
        let track_start = glam::Vec2::new(rect.left() + 20.0, track_y);
        let track_end = glam::Vec2::new(rect.right() - 20.0, track_y);
        let to_pos = |v: glam::Vec2| egui::pos2(v.x, v.y);

        painter.line_segment(
            [to_pos(track_start), to_pos(track_end)],
            egui::Stroke::new(2.0, egui::Color32::GRAY),
        );
        let span = track_end - track_start;
        for mark in track_marks(self.config.engine.track_half_range, 20.0, &self.config.scene) {
            let x = track_start + span * (mark.offset_percent / 100.0) as f32;
            painter.line_segment(
                [to_pos(x), to_pos(x + glam::Vec2::new(0.0, 6.0))],
                egui::Stroke::new(1.0, egui::Color32::GRAY),
            );
            painter.text(
                to_pos(x + glam::Vec2::new(0.0, 10.0)),
                egui::Align2::CENTER_TOP,
                format!("{}", mark.value),
                egui::FontId::proportional(10.0),
                egui::Color32::LIGHT_GRAY,
            );
        }

        // car body and wheels
        let anchor = scene.body_anchor(track_start, track_end);
        let wheel_radius = 7.0;
        let body = egui::Rect::from_center_size(
            to_pos(anchor - glam::Vec2::new(0.0, wheel_radius * 2.0 + 8.0)),
            egui::vec2(48.0, 18.0),
        );
        painter.rect_filled(body, 4.0, egui::Color32::from_rgb(99, 102, 241));
        for dx in [-14.0, 14.0] {
            let center = anchor + glam::Vec2::new(dx, -wheel_radius);
            painter.circle_filled(to_pos(center), wheel_radius, egui::Color32::from_gray(20));
            let spoke = glam::Vec2::from_angle(self.wheel_angle) * wheel_radius;
            painter.line_segment(
                [to_pos(center - spoke), to_pos(center + spoke)],
                egui::Stroke::new(1.5, egui::Color32::LIGHT_GRAY),
            );
        }

        let arrow = scene.arrow_vector();
        if arrow != glam::Vec2::ZERO {
            let color = if arrow.x > 0.0 {
                egui::Color32::from_rgb(16, 185, 129)
            } else {
                egui::Color32::from_rgb(239, 68, 68)
            };
            let origin = anchor - glam::Vec2::new(0.0, wheel_radius * 2.0 + 30.0);
            painter.arrow(
                to_pos(origin),
                egui::vec2(arrow.x, arrow.y),
                egui::Stroke::new(3.0, color),
            );
        }
    }

    fn quiz_ui(&mut self, ui: &mut egui::Ui) {
        for card in &mut self.cards {
            ui.group(|ui| quiz_card_ui(ui, card));
            ui.add_space(6.0);
        }
    }
}

impl eframe::App for LabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();
        self.deliver_frame(ctx);

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.tab, Tab::Theory, "Formulas");
                ui.selectable_value(&mut self.tab, Tab::Simulation, "Simulation");
                ui.selectable_value(&mut self.tab, Tab::Quiz, "Quiz");
            });
        });

        if let Some(error) = &self.last_load_error {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED),
                );
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match self.tab {
                Tab::Theory => self.theory_ui(ui),
                Tab::Simulation => self.simulation_ui(ui),
                Tab::Quiz => self.quiz_ui(ui),
            });
        });

        if self.driver.scheduler().requested.is_some() {
            ctx.request_repaint();
        }
    }
}

fn new_driver(config: &LabConfig) -> SimulationDriver<RepaintScheduler> {
    SimulationDriver::new(
        KinematicsEngine::new(config.parameters, config.engine),
        RepaintScheduler::default(),
    )
}

fn readout(ui: &mut egui::Ui, label: &str, value: String) {
    ui.vertical(|ui| {
        ui.label(egui::RichText::new(label).small());
        ui.label(egui::RichText::new(value).monospace().size(20.0));
    });
    ui.add_space(24.0);
}

fn quiz_card_ui(ui: &mut egui::Ui, card: &mut QuizCard) {
    let problem = card.problem();
    ui.label(egui::RichText::new(problem.title).strong().size(16.0));
    ui.label(to_plain_text(&parse_math_text(problem.question)));

    ui.horizontal(|ui| {
        let mut text = card.input().to_string();
        if ui.text_edit_singleline(&mut text).changed() {
            card.edit(text);
        }
        ui.label(problem.unit);
        if ui.button("Check").clicked() {
            card.submit();
        }
        match card.status() {
            CardStatus::Correct => {
                ui.colored_label(egui::Color32::from_rgb(16, 185, 129), "Correct!");
            }
            CardStatus::Wrong => {
                ui.colored_label(egui::Color32::from_rgb(239, 68, 68), "Not quite, try again");
            }
            CardStatus::Unanswered => {}
        }
    });

    let toggle = if card.show_solution() {
        "Hide solution"
    } else {
        "Show solution"
    };
    if ui.button(toggle).clicked() {
        card.toggle_solution();
    }
    if card.show_solution() {
        for given in &problem.givens {
            let symbol = to_plain_text(&parse_math_text(given.symbol));
            match given.note {
                Some(note) => ui.label(format!("  {} = {} ({})", symbol, given.value, note)),
                None => ui.label(format!("  {} = {}", symbol, given.value)),
            };
        }
        for step in &problem.solution {
            ui.label(to_plain_text(&parse_math_text(step)));
        }
        ui.label(
            egui::RichText::new(format!("Answer: {} {}", problem.answer, problem.unit)).strong(),
        );
    }
}
