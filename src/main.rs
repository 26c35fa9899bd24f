use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;

use glyph_mirror::camera::{CameraCapture, CameraSettings};
use glyph_mirror::cli::{self, Args, Command};
use glyph_mirror::config::Config;
use glyph_mirror::display::TerminalDisplay;
use glyph_mirror::presence::PresenceStateMachine;
use glyph_mirror::session::{self, Session};

fn main() {
    env_logger::init();

    let args = Args::parse();

    match &args.command {
        Some(Command::ListCameras) => {
            cli::list_cameras();
            return;
        }
        Some(Command::Config { action }) => {
            cli::handle_config_action(action.clone(), args.config.as_deref());
            return;
        }
        None => {}
    }

    let mut config = match Config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    args.apply_to(&mut config);

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let settings = CameraSettings {
        device_index: config.camera.device,
        ..CameraSettings::default()
    };
    let mut capture = CameraCapture::open(settings)?;
    capture.start()?;

    let quit = Arc::new(AtomicBool::new(false));
    let quit_handler = Arc::clone(&quit);
    ctrlc::set_handler(move || {
        quit_handler.store(true, Ordering::SeqCst);
    })?;

    // Terminal setup happens after the camera is up so a camera failure
    // prints a readable error instead of dying inside the alternate screen.
    let display = TerminalDisplay::new(config.mosaic.cell_size)?;

    let presence = PresenceStateMachine::new(config.presence_config());
    let mut session = Session::new(
        capture,
        display,
        presence,
        config.mosaic.cell_size,
        config.mosaic.mirror,
    );

    let result = session::run(&mut session, &quit);
    log::info!("session ended");
    result.map_err(Into::into)
}
