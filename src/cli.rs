//! Command-line interface definitions and helpers.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::camera;
use crate::config::{default_path as get_config_path, Config};

/// Presence-gated glyph mosaic mirror for a live camera feed
#[derive(Parser, Debug)]
#[command(name = "glyph-mirror")]
#[command(version, about = "Render your webcam as a glyph mosaic that earns color with presence", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Camera device index (from list-cameras)
    #[arg(long)]
    pub camera: Option<u32>,

    /// Disable horizontal mirroring (selfie mode is the default)
    #[arg(long)]
    pub no_mirror: bool,

    /// Glyph cell size in pixels
    #[arg(long)]
    pub cell_size: Option<u32>,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available cameras
    ListCameras,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

impl Args {
    /// Fold CLI overrides into a loaded config.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(camera) = self.camera {
            config.camera.device = camera;
        }
        if let Some(cell_size) = self.cell_size {
            config.mosaic.cell_size = cell_size;
        }
        if self.no_mirror {
            config.mosaic.mirror = false;
        }
    }
}

/// List available cameras and print them to stdout.
pub fn list_cameras() {
    match camera::list_devices() {
        Ok(devices) => {
            if devices.is_empty() {
                println!("No cameras found.");
                println!();
                println!("Make sure your camera is connected and permissions are granted.");
                println!("On macOS, grant access in System Settings > Privacy & Security > Camera.");
            } else {
                println!("Available cameras:");
                for device in devices {
                    println!("  {}", device);
                }
                println!();
                println!("Use --camera <index> to select a camera.");
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config_path: Option<&std::path::Path>) {
    match action {
        ConfigAction::Show => {
            let config = match Config::load(config_path) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            println!("Current configuration:");
            println!("  Camera device: {}", config.camera.device);
            println!("  Mirror: {}", if config.mosaic.mirror { "yes" } else { "no" });
            println!("  Cell size: {} px", config.mosaic.cell_size);
            println!("  Color goal: {} ms", config.presence.goal_ms);
            println!("  Motion threshold: {}", config.presence.motion_threshold);
            println!("  Presence hold: {} ms", config.presence.presence_hold_ms);
            println!("  Blackout cooldown: {} ms", config.presence.blackout_ms);
            println!();

            let path = config_path
                .map(PathBuf::from)
                .unwrap_or_else(get_config_path);
            if path.exists() {
                println!("Config file: {} (exists)", path.display());
            } else {
                println!("Config file: {} (not found, defaults in effect)", path.display());
            }
        }
        ConfigAction::Init => {
            let path = config_path
                .map(PathBuf::from)
                .unwrap_or_else(get_config_path);

            if path.exists() {
                eprintln!("Config file already exists: {}", path.display());
                eprintln!("Use 'glyph-mirror config show' to view current settings.");
                std::process::exit(1);
            }

            if let Some(parent) = path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    eprintln!("Error creating config directory: {}", e);
                    std::process::exit(1);
                }
            }

            let default_config = r#"# glyph-mirror configuration

[presence]
# Accumulated presence (ms) needed to unlock color glyphs
goal_ms = 60000
# Motion score that counts as "present"
motion_threshold = 1.0
# Allowed still time (ms) before losing presence
presence_hold_ms = 1500
# Blackout cooldown (ms) after losing presence
blackout_ms = 2000

[mosaic]
# Glyph cell size in pixels
cell_size = 18
# Mirror horizontally (selfie mode)
mirror = true

[camera]
# Camera device index
device = 0
"#;

            if let Err(e) = std::fs::write(&path, default_config) {
                eprintln!("Error writing config file: {}", e);
                std::process::exit(1);
            }

            println!("Created config file: {}", path.display());
        }
    }
}
