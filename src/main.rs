// UniAIMS - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Platform paths and config.toml loading
// 3. Logging initialisation (debug mode support)
// 4. Preference store and application state
// 5. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` can use
// `crate::app::...`, `crate::core::...` etc.
pub use uniaims::app;

pub use uniaims::core;
pub use uniaims::platform;
pub use uniaims::ui;
pub use uniaims::util;

use clap::Parser;
use std::path::PathBuf;

/// Configure fonts for the egui context.
///
/// On Windows, loads Segoe UI and Segoe UI Symbol from the system font
/// directory and puts them ahead of the egui built-ins so arrows, chart and
/// unit glyphs (µ, ⌀) render. The built-ins stay as fallbacks.
///
/// On non-Windows platforms the egui defaults are used unchanged.
fn configure_fonts(ctx: &egui::Context) {
    #[cfg(target_os = "windows")]
    {
        let mut fonts = egui::FontDefinitions::default();
        let candidates: &[(&str, &str)] = &[
            ("Segoe UI", r"C:\Windows\Fonts\segoeui.ttf"),
            ("Segoe UI Symbol", r"C:\Windows\Fonts\seguisym.ttf"),
        ];

        let mut loaded_names: Vec<&str> = Vec::new();
        for (name, path) in candidates {
            match std::fs::read(path) {
                Ok(data) => {
                    fonts
                        .font_data
                        .insert((*name).to_owned(), egui::FontData::from_owned(data).into());
                    loaded_names.push(name);
                    tracing::debug!(font = name, "Loaded Windows system font");
                }
                Err(e) => {
                    tracing::warn!(font = name, error = %e, "Failed to load Windows system font");
                }
            }
        }

        if !loaded_names.is_empty() {
            if let Some(proportional) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
                for (i, name) in loaded_names.iter().enumerate() {
                    proportional.insert(i, (*name).to_owned());
                }
            }
            ctx.set_fonts(fonts);
            tracing::info!(fonts = ?loaded_names, "Windows system fonts configured");
        }
    }

    #[cfg(not(target_os = "windows"))]
    let _ = ctx;
}

/// UniAIMS - image analysis workstation for materials science.
///
/// Browse analysis tasks and data batches, inspect particle and fiber
/// recognition results, chart attributes and assemble reports.
#[derive(Parser, Debug)]
#[command(name = "UniAIMS", version, about)]
struct Cli {
    /// Route to open at startup, e.g. "/T-1024/particles" or "/dashboard?tab=data".
    route: Option<String>,

    /// Directory holding config.toml and the preference store.
    #[arg(short = 'c', long = "config-dir")]
    config_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths: CLI override > platform default
    let paths = match cli.config_dir.as_deref() {
        Some(dir) => platform::config::PlatformPaths::from_dir(dir),
        None => platform::config::PlatformPaths::resolve(),
    };

    // Config is read before logging so its [logging] section can apply.
    let (config, mut warnings) = platform::config::load_config(&paths.config_dir);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config_dir = %paths.config_dir.display(),
        "UniAIMS starting"
    );
    for w in &warnings {
        tracing::warn!(warning = %w, "Config warning");
    }

    if let Err(e) = std::fs::create_dir_all(&paths.data_dir) {
        let msg = format!(
            "Cannot create data directory {}: {e}. The analysis mode will not be remembered.",
            paths.data_dir.display()
        );
        tracing::warn!("{}", msg);
        warnings.push(msg);
    }
    let store = platform::store::FileStore::open(&paths.store_file());

    let start = cli.route.unwrap_or_else(|| config.start_route.clone());
    tracing::info!(route = %start, page_size = config.page_size, "Ready to launch GUI");

    let mut state = app::state::AppState::new(
        Box::new(core::repository::MockRepository),
        Box::new(store),
        &start,
        config.page_size,
    );
    state.dark_mode = config.dark_mode;
    state.font_size = config.font_size;
    state.debug_mode = cli.debug;
    state.show_warnings = !warnings.is_empty();
    state.warnings = warnings;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            Ok(Box::new(gui::UniAimsApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch UniAIMS GUI: {e}");
        std::process::exit(1);
    }
}
