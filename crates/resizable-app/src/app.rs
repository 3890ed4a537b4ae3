//! Main application: window, renderer, egui and event plumbing.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use kurbo::{Point, Size};
use peniko::Color;
use resizable_core::{ConfigError, ResizableConfig, TouchEvent, TouchId, TouchPhase};
use resizable_render::{
    OverlayStyle, ParleyText, RenderContext, Renderer, RendererError, VelloRenderer, VerticalAlignment,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::event_handler::{EventHandler, SharedMeasure, MOUSE_TOUCH_ID};
use crate::ui::{render_ui, UiAction, UiState};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(String),
    #[error("Window creation failed: {0}")]
    Window(String),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Background RGBA.
    pub background: [u8; 4],
    pub show_interactive_border: bool,
    /// Vertical alignment of the labels.
    pub text_alignment: VerticalAlignment,
    /// Configuration applied to every demo view.
    pub view: ResizableConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Resizable View".to_string(),
            width: 1024,
            height: 720,
            background: [250, 250, 250, 255],
            show_interactive_border: false,
            text_alignment: VerticalAlignment::Center,
            view: ResizableConfig {
                resizable_inset: 6.0,
                interactive_border_size: 16.0,
                min_width: 48.0,
                min_height: 48.0,
                ..Default::default()
            },
        }
    }
}

impl AppConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> AppResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse a JSON document layered over [`AppConfig::default`], so nested
    /// objects only override the fields they name.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let overrides: Value = serde_json::from_str(json).map_err(ConfigError::from)?;
        let mut merged = serde_json::to_value(Self::default()).map_err(ConfigError::from)?;
        merge_json(&mut merged, overrides);
        let config: Self = serde_json::from_value(merged).map_err(ConfigError::from)?;
        config.view.validate()?;
        Ok(config)
    }

    pub fn background_color(&self) -> Color {
        let [r, g, b, a] = self.background;
        Color::from_rgba8(r, g, b, a)
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    view_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // State
    event_handler: EventHandler,
    config: AppConfig,
    /// Last cursor position, logical pixels.
    cursor_position: Point,
    mouse_down: bool,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// First fatal error, reported when the event loop returns.
    error: Option<AppError>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            error: None,
        }
    }

    /// Run the application until the window closes.
    pub fn run(config: AppConfig) -> AppResult<()> {
        let event_loop = EventLoop::new().map_err(|e| AppError::EventLoop(e.to_string()))?;
        let mut app = App::with_config(config);
        event_loop
            .run_app(&mut app)
            .map_err(|e| AppError::EventLoop(e.to_string()))?;
        match app.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> AppResult<()> {
        log::info!("Creating window...");
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| AppError::Window(e.to_string()))?,
        );

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self.render_cx.get_or_insert_with(vello::util::RenderContext::new);
        let surface: RenderSurface<'static> = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::Surface(e.to_string()))?;

        let device = &render_cx.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;

        // Vello renders to Rgba8Unorm; the surface may want another format.
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let logical = logical_size(&window);
        let measure: SharedMeasure = Rc::new(RefCell::new(ParleyText::new()));
        let mut event_handler = EventHandler::new(logical, &self.config.view, measure)?;
        event_handler.set_alignment(self.config.text_alignment);

        log::info!(
            "Resizable view demo initialized - {}x{}",
            surface.config.width,
            surface.config.height
        );

        self.state = Some(AppState {
            window: window.clone(),
            surface,
            vello_renderer,
            view_renderer: VelloRenderer::new(),
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::new(
                self.config.view.clone(),
                self.config.show_interactive_border,
                self.config.text_alignment,
            ),
            event_handler,
            config: self.config.clone(),
            cursor_position: Point::ZERO,
            mouse_down: false,
        });

        window.request_redraw();
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        log::error!("{err}");
        self.error.get_or_insert(err);
        event_loop.exit();
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    fn apply_ui_action(&mut self, action: UiAction) {
        match action {
            UiAction::SetConfig(config) => {
                if let Err(err) = self.event_handler.apply_config(&config) {
                    log::warn!("Config not applied: {err}");
                }
            }
            UiAction::ShowInteractiveBorder(show) => {
                self.config.show_interactive_border = show;
            }
            UiAction::SetAlignment(alignment) => {
                self.config.text_alignment = alignment;
                self.event_handler.set_alignment(alignment);
            }
            UiAction::ResetViews => {
                if let Err(err) = self.event_handler.reset(&self.ui_state.config) {
                    log::warn!("Reset failed: {err}");
                }
            }
        }
    }

    fn deliver(&mut self, event: TouchEvent) {
        if let Some(outcome) = self.event_handler.handle_touch(event) {
            log::trace!("{:?} {:?} -> {:?}", event.id, event.phase, outcome);
            self.window.request_redraw();
        }
    }

    fn redraw(&mut self, render_cx: &vello::util::RenderContext) -> AppResult<()> {
        self.ui_state.status = self.event_handler.status().lines();

        let egui_input = self.egui_state.take_egui_input(&self.window);
        let mut deferred_action = None;
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            deferred_action = render_ui(ctx, &mut self.ui_state);
        });
        if let Some(action) = deferred_action {
            self.apply_ui_action(action);
        }
        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let egui_primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        let style = OverlayStyle {
            show_interactive_border: self.config.show_interactive_border,
            ..Default::default()
        };
        let mut ctx = RenderContext::new(Size::new(
            self.surface.config.width as f64,
            self.surface.config.height as f64,
        ))
        .with_scale_factor(self.window.scale_factor())
        .with_background(self.config.background_color())
        .with_overlay_style(style);
        for demo in self.event_handler.views() {
            let text = demo.content.borrow().paint();
            ctx = ctx.with_text_view(&demo.view, demo.fill, text);
        }
        self.view_renderer.build_scene(&ctx);
        let scene = self.view_renderer.take_scene();

        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = self
            .surface
            .surface
            .get_current_texture()
            .map_err(|e| RendererError::Surface(e.to_string()))?;

        let width = self.surface.config.width;
        let height = self.surface.config.height;
        let params = RenderParams {
            base_color: self.config.background_color(),
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a storage-bindable Rgba8Unorm target.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        self.vello_renderer
            .render_to_texture(device, queue, &scene, &render_texture_view, &params)
            .map_err(|e| RendererError::RenderFailed(format!("{e:?}")))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        {
            let mut blit_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("blit encoder"),
                });
            self.texture_blitter
                .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
            queue.submit(std::iter::once(blit_encoder.finish()));
        }

        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        {
            let mut egui_encoder =
                device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                    label: Some("egui encoder"),
                });
            self.egui_renderer.update_buffers(
                device,
                queue,
                &mut egui_encoder,
                &egui_primitives,
                &screen_descriptor,
            );

            let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: vello::wgpu::Operations {
                        load: vello::wgpu::LoadOp::Load, // Keep Vello content
                        store: vello::wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu wants a 'static render pass.
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(egui_encoder.finish()));
        }

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();

        if self.event_handler.is_interacting() {
            self.window.request_redraw();
        }
        Ok(())
    }
}

fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}

fn logical_size(window: &Window) -> Size {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    Size::new(size.width, size.height)
}

fn touch_phase(phase: winit::event::TouchPhase) -> TouchPhase {
    match phase {
        winit::event::TouchPhase::Started => TouchPhase::Began,
        winit::event::TouchPhase::Moved => TouchPhase::Moved,
        winit::event::TouchPhase::Ended => TouchPhase::Ended,
        winit::event::TouchPhase::Cancelled => TouchPhase::Cancelled,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint {
            state.window.request_redraw();
        }
        // Gestures already in progress keep their events even over the panel.
        let egui_wants_input = !state.event_handler.is_interacting()
            && (egui_response.consumed
                || state.egui_ctx.is_pointer_over_area()
                || state.egui_ctx.wants_pointer_input());

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                let logical = logical_size(&state.window);
                state.event_handler.set_viewport_size(logical);
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                let Some(render_cx) = self.render_cx.as_ref() else {
                    return;
                };
                if let Err(err) = state.redraw(render_cx) {
                    // A lost or outdated surface recovers on the next frame.
                    log::warn!("Frame skipped: {err}");
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let position = position.to_logical::<f64>(state.window.scale_factor());
                state.cursor_position = Point::new(position.x, position.y);
                if state.mouse_down {
                    let event = TouchEvent::new(MOUSE_TOUCH_ID, TouchPhase::Moved, state.cursor_position);
                    state.deliver(event);
                }
            }

            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => {
                let phase = match button_state {
                    ElementState::Pressed if !egui_wants_input => TouchPhase::Began,
                    ElementState::Pressed => return,
                    ElementState::Released if state.mouse_down => TouchPhase::Ended,
                    ElementState::Released => return,
                };
                state.mouse_down = phase == TouchPhase::Began;
                let event = TouchEvent::new(MOUSE_TOUCH_ID, phase, state.cursor_position);
                state.deliver(event);
            }

            WindowEvent::Touch(touch) => {
                let phase = touch_phase(touch.phase);
                if phase == TouchPhase::Began && egui_wants_input {
                    return;
                }
                let location = touch.location.to_logical::<f64>(state.window.scale_factor());
                let event = TouchEvent::new(TouchId(touch.id), phase, Point::new(location.x, location.y));
                state.deliver(event);
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.view.validate().is_ok());
        assert!(config.view.interactive_border_size > 0.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            AppConfig::from_json(r#"{ "title": "Demo", "view": { "disable_pan": true } }"#).unwrap();
        assert_eq!(config.title, "Demo");
        assert_eq!(config.width, 1024);
        assert!(config.view.disable_pan);
        assert!(config.view.prevents_position_outside_superview);
        assert_eq!(config.view.interactive_border_size, 16.0);
        assert_eq!(config.view.resizable_inset, 6.0);
        assert_eq!(config.view.min_width, 48.0);
        assert_eq!(config.text_alignment, VerticalAlignment::Center);

        let config = AppConfig::from_json(r#"{ "text_alignment": "bottom" }"#).unwrap();
        assert_eq!(config.text_alignment, VerticalAlignment::Bottom);
    }

    #[test]
    fn test_invalid_view_config_is_rejected() {
        let err = AppConfig::from_json(r#"{ "view": { "min_height": -1.0 } }"#).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::Negative { .. })));
        assert!(AppConfig::from_json("[1, 2").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load(Path::new("/nonexistent/resizable.json")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn test_touch_phase_mapping() {
        assert_eq!(touch_phase(winit::event::TouchPhase::Started), TouchPhase::Began);
        assert_eq!(touch_phase(winit::event::TouchPhase::Cancelled), TouchPhase::Cancelled);
    }
}
