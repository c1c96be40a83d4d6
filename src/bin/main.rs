use std::collections::HashMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use particle_field::{
    Command, FieldConfig, HostAction, KeyRepeatGuard, ParticleField, Primitive, Rgba, Surface,
    TrailCanvas,
};
use rand::prelude::*;

const FLASH_DURATION: Duration = Duration::from_millis(100);
const BUTTON_FILL: egui::Color32 = egui::Color32::from_rgb(0x33, 0x33, 0x33);
const BUTTON_LIT_FILL: egui::Color32 = egui::Color32::from_rgb(0x55, 0x55, 0x55);

#[derive(Parser, Debug)]
#[command(about = "Bouncing particles with gravity, pointer attraction and collision colors")]
struct Args {
    /// YAML file overriding the default field configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for particle placement and colors
    #[arg(long)]
    seed: Option<u64>,
}

/// Short darkening of a control after it fires.
#[derive(Default)]
struct ButtonFlash {
    lit_until: HashMap<Command, Instant>,
}

impl ButtonFlash {
    fn trigger(&mut self, command: Command, now: Instant) {
        self.lit_until.insert(command, now + FLASH_DURATION);
    }

    fn is_lit(&self, command: Command, now: Instant) -> bool {
        self.lit_until.get(&command).map_or(false, |until| now < *until)
    }

    /// Time until the next flash ends, if one is still showing.
    fn pending(&self, now: Instant) -> Option<Duration> {
        self.lit_until
            .values()
            .filter(|until| **until > now)
            .map(|until| *until - now)
            .min()
    }
}

struct ParticleApp {
    field: ParticleField<StdRng>,
    canvas: TrailCanvas,
    keys: KeyRepeatGuard,
    flash: ButtonFlash,
    last_frame_time: Instant,
}

impl ParticleApp {
    fn new(config: &FieldConfig, rng: StdRng) -> Self {
        let size = cgmath::vec2(config.width, config.height);
        Self {
            field: ParticleField::new(config, size, rng),
            canvas: TrailCanvas::new(size),
            keys: KeyRepeatGuard::new(),
            flash: ButtonFlash::default(),
            last_frame_time: Instant::now(),
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, command: Command) {
        self.flash.trigger(command, Instant::now());
        if let Some(action) = self.field.apply(command) {
            self.perform(ctx, action);
        }
    }

    fn perform(&mut self, ctx: &egui::Context, action: HostAction) {
        match action {
            // no more ticks once update() stops requesting repaints
            HostAction::StopTicks => {}
            HostAction::ResumeTicks => {
                self.last_frame_time = Instant::now();
                ctx.request_repaint();
            }
            HostAction::SetCursorVisible(visible) => self.canvas.set_cursor_visible(visible),
            HostAction::Navigate(url) => {
                log::info!("opening {url}");
                ctx.output_mut(|o| o.open_url = Some(egui::output::OpenUrl::new_tab(url)));
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let events = ctx.input(|i| i.events.clone());
        for event in events {
            if let egui::Event::Key { key, pressed, .. } = event {
                let Some(key) = key_char(key) else { continue };
                if pressed {
                    if let Some(command) = self.keys.press(key) {
                        self.dispatch(ctx, command);
                    }
                } else {
                    self.keys.release(key);
                }
            }
        }
    }

    fn button_label(&self, command: Command) -> String {
        let state = self.field.state();
        let on_off = |enabled: bool| if enabled { "ON" } else { "OFF" };
        match command {
            Command::PauseResume => (if state.paused { "Resume" } else { "Pause" }).to_owned(),
            Command::CycleSpeed => format!("Speed: {}x", state.speed()),
            Command::ToggleAttraction => format!("Attraction: {}", on_off(state.attraction.enabled)),
            Command::ToggleGravity => format!("Gravity: {}", on_off(state.gravity.enabled)),
            Command::CycleCount => format!("Balls: {}", state.target_count()),
            Command::NavigateContribute => "Contribute".to_owned(),
        }
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        let now = Instant::now();
        ui.horizontal(|ui| {
            for command in Command::ALL {
                let lit = self.flash.is_lit(command, now)
                    || (command == Command::ToggleAttraction && self.field.state().attraction.enabled);
                let label = format!("{} [{}]", self.button_label(command), command.key());
                let button = egui::Button::new(label).fill(if lit { BUTTON_LIT_FILL } else { BUTTON_FILL });
                if ui.add(button).clicked() {
                    self.dispatch(ui.ctx(), command);
                }
            }
        });
    }
}

impl eframe::App for ParticleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("Controls").show(ctx, |ui| {
            self.render_controls(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
                self.canvas.resize(cgmath::vec2(rect.width(), rect.height()));

                if let Some(pos) = response.hover_pos() {
                    self.field.set_pointer(pos.x - rect.min.x, pos.y - rect.min.y);
                }

                if !self.field.state().paused {
                    let now = Instant::now();
                    let frame_time = now.duration_since(self.last_frame_time);
                    self.last_frame_time = now;
                    self.field.tick(&mut self.canvas, frame_time);
                }

                paint_canvas(&ui.painter_at(rect), rect.min, &self.canvas);

                if response.hovered() && !self.canvas.cursor_visible() {
                    ui.ctx().output_mut(|o| o.cursor_icon = egui::CursorIcon::None);
                }
            });

        if !self.field.state().paused {
            ctx.request_repaint();
        } else if let Some(wait) = self.flash.pending(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }
}

fn key_char(key: egui::Key) -> Option<char> {
    match key {
        egui::Key::P => Some('p'),
        egui::Key::S => Some('s'),
        egui::Key::A => Some('a'),
        egui::Key::G => Some('g'),
        egui::Key::B => Some('b'),
        egui::Key::C => Some('c'),
        _ => None,
    }
}

fn to_color32(color: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.rgb.r, color.rgb.g, color.rgb.b, color.alpha_u8())
}

fn paint_canvas(painter: &egui::Painter, origin: egui::Pos2, canvas: &TrailCanvas) {
    let at = |v: cgmath::Vector2<f32>| origin + egui::vec2(v.x, v.y);

    for primitive in canvas.primitives() {
        match primitive {
            Primitive::FilledCircle {
                center,
                radius,
                color,
            } => {
                painter.circle_filled(at(*center), *radius, to_color32(*color));
            }
            Primitive::StrokedCircle {
                center,
                radius,
                color,
                line_width,
            } => {
                painter.circle_stroke(at(*center), *radius, egui::Stroke::new(*line_width, to_color32(*color)));
            }
            Primitive::Text {
                position,
                text,
                color,
                font_size,
            } => {
                painter.text(
                    at(*position),
                    egui::Align2::LEFT_BOTTOM,
                    text,
                    egui::FontId::proportional(*font_size),
                    to_color32(*color),
                );
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => FieldConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => FieldConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!(
        "starting with {} particles in a {}x{} field",
        config.initial_count,
        config.width,
        config.height
    );

    let options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(config.width, config.height)),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "Bouncing Particles",
        options,
        Box::new(move |_cc| Box::new(ParticleApp::new(&config, rng))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run the window: {e}"))
}
