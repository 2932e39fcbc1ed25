use egui::color_picker::{self, Alpha};
use egui::{Color32, Id, LayerId, Order, Sense, Vec2};
use log::{info, warn};

use crate::command::Command;
use crate::config::CanvasConfig;
use crate::element::{AxisLock, Style};
use crate::file_handler::FileHandler;
use crate::input::InputHandler;
use crate::renderer::{PainterSurface, Renderer};
use crate::state::EditorContext;
use crate::texture_manager::TextureManager;
use crate::tools::ToolType;

const CANVAS_BACKGROUND: Color32 = Color32::WHITE;

/// What survives a restart. The drawing itself is not persisted.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct AppSettings {
    pub config: CanvasConfig,
    pub style: Option<Style>,
}

pub struct VectorApp {
    editor: EditorContext,
    renderer: Renderer,
    textures: TextureManager,
    input: InputHandler,
    files: FileHandler,
}

impl Default for VectorApp {
    fn default() -> Self {
        Self::with_config(CanvasConfig::default())
    }
}

impl VectorApp {
    /// Called once before the first frame. `config` overrides the persisted
    /// settings when given.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Option<CanvasConfig>) -> Self {
        let persisted: Option<AppSettings> = cc.storage.and_then(|storage| eframe::get_value(storage, eframe::APP_KEY));
        match (config, persisted) {
            (Some(config), _) => Self::with_config(config),
            (None, Some(settings)) => Self::from_settings(settings),
            (None, None) => Self::default(),
        }
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        Self {
            renderer: Renderer::new(config.stroke_width, config.ghost_alpha),
            editor: EditorContext::new(config),
            textures: TextureManager::default(),
            input: InputHandler::default(),
            files: FileHandler::new(),
        }
    }

    /// Restore a previous session's config and drawing colors.
    pub fn from_settings(settings: AppSettings) -> Self {
        let mut app = Self::with_config(settings.config);
        if let Some(style) = settings.style {
            app.editor.style = style;
        }
        app
    }

    /// Snapshot of the persisted part of the app, read from the editor.
    pub fn settings(&self) -> AppSettings {
        AppSettings {
            config: self.editor.config.clone(),
            style: Some(self.editor.style),
        }
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut EditorContext {
        &mut self.editor
    }

    fn load_dropped_images(&mut self, ctx: &egui::Context) {
        self.files.preview_files_being_dropped(ctx);
        if !self.files.check_for_dropped_files(ctx) {
            return;
        }
        for image in self.files.take_images() {
            match self.editor.load_picture_bitmap(&image.bytes) {
                Ok(Some(id)) => info!("Loaded {} into picture {id}", image.name),
                Ok(None) => {}
                Err(err) => warn!("Could not load {}: {err}", image.name),
            }
        }
    }

    fn tools_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("tools_panel")
            .resizable(true)
            .default_width(180.0)
            .show(ctx, |ui| {
                ui.heading("Tools");
                for tool in ToolType::ALL {
                    if ui.selectable_label(self.editor.tool() == tool, tool.name()).clicked() {
                        info!("Tool selected from UI: {}", tool.name());
                        self.editor.set_tool_by_name(tool.name());
                    }
                }

                ui.separator();
                ui.horizontal_wrapped(|ui| {
                    let commands = [
                        ("Raise", Command::Raise),
                        ("Lower", Command::Lower),
                        ("Duplicate", Command::Duplicate),
                        ("Delete", Command::DeleteSelection),
                        ("Erase last", Command::EraseLast),
                    ];
                    for (label, command) in commands {
                        if ui.button(label).clicked() {
                            self.editor.execute(command);
                        }
                    }
                });

                ui.separator();
                let mut style = self.editor.style;
                let mut changed = false;
                ui.horizontal(|ui| {
                    ui.label("Stroke:");
                    changed |= color_picker::color_edit_button_srgba(ui, &mut style.stroke, Alpha::OnlyBlend).changed();
                });
                ui.horizontal(|ui| {
                    ui.label("Fill:");
                    changed |= color_picker::color_edit_button_srgba(ui, &mut style.fill, Alpha::OnlyBlend).changed();
                });
                if changed {
                    self.editor.set_style(style);
                }

                ui.separator();
                ui.heading("Selection");
                for row in self.editor.selection_summary() {
                    ui.horizontal(|ui| {
                        for color in [row.stroke, row.fill] {
                            let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                            ui.painter().rect_filled(rect, 2.0, color);
                        }
                        ui.label(format!("{} #{}", row.kind, row.id));
                    });
                }
            });
    }

    fn status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} | {}", self.editor.tool().name(), self.editor.state().name()));
                ui.separator();
                ui.label(format!(
                    "{} shapes, {} selected",
                    self.editor.document.len(),
                    self.editor.selection.len()
                ));
                let mouse = self.editor.mouse();
                ui.label(format!("({:.0}, {:.0})", mouse.x, mouse.y));
                let delta = self.editor.drag_delta();
                if delta != Vec2::ZERO {
                    ui.label(format!("drag {:.0}, {:.0}", delta.x, delta.y));
                }
                if self.editor.axis_lock() != AxisLock::None {
                    ui.separator();
                    ui.label(format!("axis lock {:?}", self.editor.axis_lock()));
                }
            });
        });
    }

    fn canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
            let rect = response.rect;

            self.input.set_canvas_rect(rect);
            for event in self.input.process_input(ctx) {
                self.editor.handle_event(&event);
            }

            self.textures.begin_frame();
            let document = &self.editor.document;
            self.textures.retain_shapes(|id| document.contains_id(id));

            {
                let mut committed = PainterSurface::new(&painter, &mut self.textures, rect.min, Some(CANVAS_BACKGROUND));
                self.renderer.render_committed(&mut committed, &self.editor.document);
            }
            {
                let ghost_painter = painter.clone().with_layer_id(LayerId::new(Order::Foreground, Id::new("ghost_layer")));
                let mut ghost = PainterSurface::new(&ghost_painter, &mut self.textures, rect.min, None);
                self.renderer.render_ghost(&mut ghost, &self.editor);
            }
        });
    }
}

impl eframe::App for VectorApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.load_dropped_images(ctx);
        self.tools_panel(ctx);
        self.status_bar(ctx);
        self.canvas(ctx);
    }
}
