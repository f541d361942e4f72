use anyhow::{Context, Result};
use log::info;
use rusted_input::engine::game_loop::GameLoop;
#[cfg(feature = "gamepad")]
use rusted_input::engine::input::GilrsJoypads;
#[cfg(not(feature = "gamepad"))]
use rusted_input::engine::input::VirtualJoypads;
use rusted_input::engine::input::{ActionId, InputEngine, InputSettings, KeyboardState};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{EventLoop, EventLoopWindowTarget},
    window::{Fullscreen, Window, WindowBuilder},
};

#[cfg(feature = "gamepad")]
type HostJoypads = GilrsJoypads;
#[cfg(not(feature = "gamepad"))]
type HostJoypads = VirtualJoypads;

type HostEngine = InputEngine<KeyboardState, HostJoypads>;

/// Hotkeys announced at startup
const HOTKEYS: [ActionId; 4] = [
    ActionId::MenuToggle,
    ActionId::FastForwardToggle,
    ActionId::FullscreenToggle,
    ActionId::ShouldClose,
];

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Input...");

    // Optional settings file as first argument
    let settings = match std::env::args().nth(1) {
        Some(path) => InputSettings::load(&path)
            .with_context(|| format!("Failed to load input settings from {}", path))?,
        None => InputSettings::default(),
    };

    let mut engine = InputEngine::with_settings(KeyboardState::new(), host_joypads()?, &settings);
    let mut clock = GameLoop::new();

    for action in HOTKEYS {
        let keys = engine.keyboard_bindings().get_keys(action);
        if keys.is_empty() {
            info!("{:?}: no key", action);
        } else {
            info!("{:?}: {:?}", action, keys);
        }
    }

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Rusted Input")
        .with_inner_size(winit::dpi::LogicalSize::new(640, 480))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                engine.keyboard_mut().process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                // Key-up events are lost while unfocused
                engine.keyboard_mut().clear();
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                sync_joypads(&mut engine);
                run_frames(&mut engine, &mut clock, &window, elwt);
            }
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

#[cfg(feature = "gamepad")]
fn host_joypads() -> Result<HostJoypads> {
    GilrsJoypads::new().context("Failed to initialize gamepads")
}

#[cfg(not(feature = "gamepad"))]
fn host_joypads() -> Result<HostJoypads> {
    info!("Built without the gamepad feature, keyboard only");
    Ok(VirtualJoypads::new())
}

/// Forward hot-plug changes to the engine before the frame polls
#[cfg(feature = "gamepad")]
fn sync_joypads(engine: &mut HostEngine) {
    for (joy, event) in engine.joypads_mut().sync() {
        engine.device_event(joy, event);
    }
}

#[cfg(not(feature = "gamepad"))]
fn sync_joypads(_engine: &mut HostEngine) {}

/// Run the emulated frames due this host frame
fn run_frames(
    engine: &mut HostEngine,
    clock: &mut GameLoop,
    window: &Window,
    elwt: &EventLoopWindowTarget<()>,
) {
    let steps = clock.begin_frame();
    if clock.is_paused() {
        // Hotkeys only; the paused tick's history slot stays as committed
        engine.poll_paused();
        handle_hotkeys(engine, clock, window, elwt);
        return;
    }

    for _ in 0..steps {
        let tick = clock.advance();
        engine.poll_tick(tick);
        handle_hotkeys(engine, clock, window, elwt);
        if clock.is_paused() {
            break;
        }
    }

    if clock.frame_count() % 600 == 0 {
        log::debug!("tick {} at {:.1} fps", clock.tick(), clock.fps());
    }
}

fn handle_hotkeys(
    engine: &HostEngine,
    clock: &mut GameLoop,
    window: &Window,
    elwt: &EventLoopWindowTarget<()>,
) {
    if engine.any_player_just_pressed(ActionId::MenuToggle) {
        clock.toggle_pause();
    }
    if engine.any_player_just_pressed(ActionId::FastForwardToggle) {
        clock.toggle_fast_forward();
    }
    if engine.any_player_just_pressed(ActionId::FullscreenToggle) {
        let fullscreen = window.fullscreen().is_some();
        window.set_fullscreen(if fullscreen {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        });
        info!("Fullscreen {}", if fullscreen { "off" } else { "on" });
    }
    if engine.any_player_just_pressed(ActionId::ShouldClose) {
        info!("Quit requested at tick {}", clock.tick());
        elwt.exit();
    }
}
