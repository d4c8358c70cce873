use anyhow::Result;
use glam::Vec2;
use log::{debug, info, warn};
use mg_input::{AxisType, InputManager, WinitDevice};
use std::time::Instant;
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::KeyCode,
    window::WindowBuilder,
};

/// Context holding the map view actions
const VIEW_CONTEXT: &str = "ViewAction";

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting input demo...");

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Input Demo")
        .with_inner_size(LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    let mut input = InputManager::new(WinitDevice::new());
    input.bind_axis("Demo.LookX", AxisType::MouseX);
    input.bind_axis("Demo.LookY", AxisType::MouseY);

    info!("F2 toggles mouse lock, F3 toggles the {} context", VIEW_CONTEXT);

    let mut last_frame = Instant::now();
    let mut view_context = false;

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let elapsed = now.duration_since(last_frame).as_secs_f32();
                    last_frame = now;

                    input.update(elapsed);

                    if let Some(target) = input.source_mut().take_pending_warp() {
                        let position = PhysicalPosition::new(target.x as f64, target.y as f64);
                        if let Err(e) = window.set_cursor_position(position) {
                            warn!("Failed to warp cursor: {}", e);
                        }
                    }

                    // Demo toggles read raw keys so they work in any context
                    let toggle_lock = input.input_state().is_key_released(KeyCode::F2);
                    let toggle_view = input.input_state().is_key_released(KeyCode::F3);
                    if toggle_lock {
                        if input.is_mouse_locked() {
                            input.unlock_mouse();
                            window.set_cursor_visible(true);
                        } else {
                            let size = window.inner_size();
                            input.lock_mouse(Vec2::new(
                                size.width as f32 / 2.0,
                                size.height as f32 / 2.0,
                            ));
                            window.set_cursor_visible(false);
                        }
                    } else if toggle_view {
                        if view_context {
                            input.pop_input_context();
                        } else {
                            input.push_input_context(VIEW_CONTEXT);
                        }
                        view_context = !view_context;
                        info!("Input context: {:?}", input.current_input_context());
                    }

                    for action in input.actions_pressed() {
                        info!("Action pressed: {}", action);
                    }
                    for symbol in input.symbols_pressed() {
                        info!("Symbol: {:?}", symbol.lowercase);
                    }

                    let look = Vec2::new(input.axis("Demo.LookX"), input.axis("Demo.LookY"));
                    if look != Vec2::ZERO {
                        debug!("Look: ({}, {})", look.x, look.y);
                    }
                }
                WindowEvent::Focused(false) => {
                    input
                        .source_mut()
                        .process_window_event(&WindowEvent::Focused(false));
                    input.reset();
                }
                other => {
                    input.source_mut().process_window_event(&other);
                }
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
