// src/main.rs

pub mod app;
pub mod rendering_lib;
pub mod ui;

use std::sync::Arc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::WindowBuilder,
};

use app::{AppError, ShapeCanvasApp};
use shape_canvas::config::AppConfig;

async fn try_run() -> Result<(), AppError> {
    let config = AppConfig::load_from_env().unwrap_or_else(|e| {
        log::error!("{e}; using default configuration");
        AppConfig::default()
    });

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Shape Canvas")
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.canvas.width + f64::from(ui::PANEL_WIDTH),
                config.canvas.height,
            ))
            .build(&event_loop)?,
    );

    #[cfg(target_arch = "wasm32")]
    {
        use winit::platform::web::WindowExtWebSys;
        web_sys::window()
            .and_then(|win| win.document())
            .and_then(|doc| {
                let dst = doc.get_element_by_id("wasm-viewport")?;
                let canvas = web_sys::Element::from(window.canvas()?);
                dst.append_child(&canvas).ok()?;
                Some(())
            })
            .unwrap_or_else(|| log::error!("Couldn't append canvas to document body."));
    }

    let mut app_state = ShapeCanvasApp::new(window.clone(), config).await?;

    event_loop.run(move |event, target: &EventLoopWindowTarget<()>| {
        target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { ref event, window_id } if window_id == window.id() => {
                if !app_state.handle_window_event(event, &window) {
                    match event {
                        WindowEvent::CloseRequested => target.exit(),
                        WindowEvent::Resized(physical_size) => app_state.resize(*physical_size),
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                match app_state.render(&window) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        app_state.resize(app_state.get_size());
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("WGPU out of memory, exiting");
                        target.exit();
                    }
                    Err(e) => log::warn!("Surface error: {e:?}"),
                }

                if !target.exiting() {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    })?;
    Ok(())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen(start))]
pub async fn run() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            std::panic::set_hook(Box::new(console_error_panic_hook::hook));
            console_log::init_with_level(log::Level::Warn).expect("Couldn't initialize logger");
        } else {
            env_logger::init();
        }
    }

    if let Err(e) = try_run().await {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[tokio::main]
async fn main() {
    run().await;
}
