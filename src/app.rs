// src/app.rs

use std::sync::Arc;

use glam::Affine2;
use rand::rngs::StdRng;
use thiserror::Error;
use winit::{event::WindowEvent, window::Window};

use shape_canvas::config::AppConfig;
use shape_canvas::form::ControlForm;
use shape_canvas::scene::{scene_rng, CanvasScene};
use shape_canvas::tessellator::Tessellator;

use crate::rendering_lib::{ClipRect, Renderer, WGSL_SHADER_SOURCE};
use crate::ui::{build_ui, UiActions, INPUT_ERROR_MESSAGE};

const WINDOW_CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.93, g: 0.93, b: 0.93, a: 1.0 };

#[derive(Error, Debug)]
pub enum AppError {
    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible graphics adapter found")]
    NoAdapter,

    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

pub struct ShapeCanvasApp {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    renderer: Renderer,
    tessellator: Tessellator,
    uploaded: Option<(u64, Affine2)>,
    scene: CanvasScene<StdRng>,
    form: ControlForm,
    error_message: Option<String>,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl ShapeCanvasApp {
    pub async fn new(window: Arc<Window>, app_config: AppConfig) -> Result<Self, AppError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(AppError::NoAdapter)?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scale_factor = window.scale_factor() as f32;
        let renderer = Renderer::new(
            &device,
            config.format,
            WGSL_SHADER_SOURCE,
            config.width as f32 / scale_factor,
            config.height as f32 / scale_factor,
        );

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(scale_factor),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, config.format, None, 1);

        let form = ControlForm::new(&app_config.controls);
        let rng = scene_rng(&app_config.generator);
        let scene = CanvasScene::new(app_config, rng);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            renderer,
            tessellator: Tessellator::new(),
            uploaded: None,
            scene,
            form,
            error_message: None,
            egui_ctx,
            egui_state,
            egui_renderer,
        })
    }

    pub fn get_size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.size
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn run_ui(&mut self, window: &Window) -> egui::FullOutput {
        let raw_input = self.egui_state.take_egui_input(window);
        let mut actions = UiActions::default();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            actions = build_ui(ctx, &mut self.form, &self.scene.config().controls, &mut self.error_message);
        });

        if actions.scale_changed {
            self.scene.set_scale(self.form.scale);
        }
        if actions.generate {
            match self.scene.submit(&self.form) {
                Ok(report) => log::debug!("{} shapes on canvas", report.total()),
                Err(e) => self.error_message = Some(format!("{INPUT_ERROR_MESSAGE}\n{e}")),
            }
        }
        full_output
    }

    /// Re-tessellates the canvas only when its drawing or view changed.
    fn sync_canvas_mesh(&mut self) {
        let transform = self.scene.canvas().view_transform();
        let key = (self.scene.display_list().revision(), transform);
        if self.uploaded == Some(key) {
            return;
        }
        let mesh = self.tessellator.tessellate(self.scene.display_list(), transform);
        log::trace!("canvas mesh: {} vertices, {} indices", mesh.vertices.len(), mesh.indices.len());
        self.renderer.upload_mesh(&self.device, &self.queue, mesh);
        self.uploaded = Some(key);
    }

    fn canvas_clip_rect(&self, scale_factor: f32) -> ClipRect {
        let canvas = self.scene.canvas();
        let width = ((canvas.width() as f32 * scale_factor).round() as u32).min(self.config.width);
        let height = ((canvas.height() as f32 * scale_factor).round() as u32).min(self.config.height);
        ClipRect { x: 0, y: 0, width, height }
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let full_output = self.run_ui(window);
        self.sync_canvas_mesh();

        let output_texture = self.surface.get_current_texture()?;
        let view = output_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Main Command Encoder"),
        });

        let scale_factor = window.scale_factor() as f32;
        self.renderer.render_canvas(
            &self.queue,
            &mut encoder,
            &view,
            self.config.width as f32 / scale_factor,
            self.config.height as f32 / scale_factor,
            self.canvas_clip_rect(scale_factor),
            WINDOW_CLEAR_COLOR,
        );

        self.egui_state.handle_platform_output(window, full_output.platform_output);
        let tris = self.egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };
        self.egui_renderer.update_buffers(&self.device, &self.queue, &mut encoder, &tris, &screen_descriptor);
        {
            let mut gui_render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            self.egui_renderer.render(&mut gui_render_pass, &tris, &screen_descriptor);
        }
        for tex_id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(tex_id);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output_texture.present();
        Ok(())
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }
}
