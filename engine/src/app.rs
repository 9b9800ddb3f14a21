//! Windowed presentation: a winit window with a `pixels` frame buffer behind the `Surface` trait.
//!
//! Unlike a typical `EventLoop::run` game, kiosk programs drive their own loop and only ask the
//! window for whatever events arrived since the last poll, so `KioskWindow::poll` pumps the
//! event loop with `run_return` and hands back a flat list of inputs.

use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use thiserror::Error;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Fullscreen, Window, WindowBuilder};

use crate::surface::{Surface, SurfaceSize};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create pixel buffer: {0}")]
    Pixels(#[from] pixels::Error),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Logical frame size the game draws at; the window scales it to fit.
    pub size: SurfaceSize,
    pub fullscreen: bool,
    pub vsync: Option<bool>,
    pub hide_cursor: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowInput {
    Key { key: VirtualKeyCode, pressed: bool },
    Resized(SurfaceSize),
    CloseRequested,
}

pub struct KioskWindow {
    event_loop: EventLoop<()>,
    window: Window,
}

impl KioskWindow {
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Drains every pending window event without blocking.
    pub fn poll(&mut self) -> Vec<WindowInput> {
        let mut inputs = Vec::new();
        self.event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Poll;
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => inputs.push(WindowInput::CloseRequested),
                    WindowEvent::Resized(size) => {
                        inputs.push(WindowInput::Resized(SurfaceSize::new(size.width, size.height)))
                    }
                    WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                state,
                                virtual_keycode: Some(key),
                                ..
                            },
                        ..
                    } => inputs.push(WindowInput::Key {
                        key,
                        pressed: state == ElementState::Pressed,
                    }),
                    _ => {}
                },
                Event::MainEventsCleared => *control_flow = ControlFlow::Exit,
                _ => {}
            }
        });
        inputs
    }
}

/// `Surface` backed by a `pixels` frame buffer.
pub struct PixelsSurface {
    pixels: Pixels,
    size: SurfaceSize,
}

impl Surface for PixelsSurface {
    type Error = pixels::Error;

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn frame(&self) -> &[u8] {
        self.pixels.frame()
    }

    fn frame_mut(&mut self) -> &mut [u8] {
        self.pixels.frame_mut()
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.pixels.render()
    }

    fn window_resized(&mut self, size: SurfaceSize) {
        if size.is_empty() {
            return;
        }
        if let Err(err) = self.pixels.resize_surface(size.width, size.height) {
            log::warn!("resize failed: {err}");
        }
    }
}

pub fn open_window(config: &AppConfig) -> Result<(KioskWindow, PixelsSurface), AppError> {
    let event_loop = EventLoop::new();
    let mut builder = WindowBuilder::new()
        .with_title(config.title.clone())
        .with_inner_size(PhysicalSize::new(config.size.width, config.size.height));
    if config.fullscreen {
        builder = builder.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }
    let window = builder.build(&event_loop)?;
    if config.hide_cursor {
        window.set_cursor_visible(false);
    }

    let window_size = window.inner_size();
    let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
    let mut pixels_builder =
        PixelsBuilder::new(config.size.width, config.size.height, surface_texture);
    if let Some(vsync) = config.vsync {
        pixels_builder = pixels_builder.enable_vsync(vsync);
    }
    let pixels = pixels_builder.build()?;
    log::info!(
        "opened {}x{} window ({}x{} frame, fullscreen={})",
        window_size.width,
        window_size.height,
        config.size.width,
        config.size.height,
        config.fullscreen
    );

    Ok((
        KioskWindow { event_loop, window },
        PixelsSurface {
            pixels,
            size: config.size,
        },
    ))
}
