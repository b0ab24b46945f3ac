//! Hand gesture pointer control for X11 desktops.

use anyhow::Result;
use clap::Parser;
use hand_actuator::{
    actuator::HandActuator,
    capture::OpenCvCamera,
    config::{Config, EXAMPLE_CONFIG},
    cursor_control::CursorController,
    hand_detection::OnnxHandDetector,
    publisher::FramePublisher,
};
use log::{info, warn};
use opencv::{
    core::Mat,
    highgui::{self, WINDOW_NORMAL},
};
use std::path::PathBuf;

const WINDOW_NAME: &str = "Hand Actuator";
const KEY_ESC: i32 = 27;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera index to use (overrides the config file)
    #[arg(long)]
    cam: Option<i32>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Path to the hand landmark ONNX model
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Cursor filter (hysteresis, none)
    #[arg(short, long)]
    filter: Option<String>,

    /// Run without the preview window
    #[arg(long)]
    no_gui: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,
}

fn load_config(path: &str) -> Config {
    info!("Loading configuration from: {}", path);
    let loaded = Config::from_file(path).and_then(|config| {
        config.validate()?;
        Ok(config)
    });

    match loaded {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config file: {}. Using defaults.", e);
            Config::default()
        }
    }
}

fn show_preview(publisher: &FramePublisher<Mat>) -> Result<()> {
    highgui::named_window(WINDOW_NAME, WINDOW_NORMAL)?;
    info!("Press 'q' or Esc in the preview window to quit");

    let mut shown = 0;
    loop {
        if let Some((sequence, frame)) = publisher.read_with_sequence() {
            if sequence != shown {
                highgui::imshow(WINDOW_NAME, &frame)?;
                shown = sequence;
            }
        }

        let key = highgui::wait_key(10)?;
        if key == i32::from(b'q') || key == KEY_ESC {
            break;
        }
    }

    highgui::destroy_all_windows()?;
    Ok(())
}

fn wait_for_enter() -> Result<()> {
    info!("Running headless, press Enter to quit");
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Hand Actuator");

    let mut config = args.config.as_deref().map_or_else(Config::default, load_config);
    if let Some(cam) = args.cam {
        config.camera.index = cam;
    }
    if let Some(model) = args.model {
        config.detector.model = model;
    }
    if let Some(filter) = args.filter {
        config.filter.kind = filter;
    }
    if args.no_gui {
        config.display.gui = false;
    }

    let detector = OnnxHandDetector::new(&config.detector.model, config.detector.min_presence)?;
    let pointer = CursorController::new()?;
    let gui = config.display.gui;

    let mut actuator = HandActuator::new(config, OpenCvCamera, detector, pointer);
    actuator.start()?;

    let result = if gui {
        show_preview(&actuator.publisher())
    } else {
        wait_for_enter()
    };

    actuator.stop()?;
    result
}
