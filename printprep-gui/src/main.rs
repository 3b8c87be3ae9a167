use clap::{Arg, Command};
use tracing::info;

use printprep_gui::app::PrintPrep;
use printprep_gui::settings::GuiSettings;
use printprep_model::ProfileStorage;

pub fn main() -> iced::Result {
    let matches = Command::new("printprep")
        .about("printprep - print preparation and quality profile management")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(clap::ArgAction::SetTrue)
                .help("Enable verbose logging"),
        )
        .arg(
            Arg::new("profiles-dir")
                .long("profiles-dir")
                .value_name("DIR")
                .action(clap::ArgAction::Append)
                .help("Additional profile directory to scan (repeatable, highest priority last)")
                .required(false),
        )
        .get_matches();

    // Initialize logging with appropriate levels
    let log_level = if matches.get_flag("verbose") {
        "debug"
    } else if std::env::var("RUST_LOG").is_err() {
        // Default to info level, but filter out overly verbose crates
        "info,wgpu_core=warn,wgpu_hal=warn,naga=warn,winit=warn,iced=info"
    } else {
        // Respect existing RUST_LOG
        &std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    // SAFETY: This is called during single-threaded initialization before any
    // threads are spawned, so there's no risk of data races.
    unsafe { std::env::set_var("RUST_LOG", log_level) };

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(true)
        .event_format(
            tracing_subscriber::fmt::format()
                .with_target(false)
                .compact(),
        )
        .init();

    let mut storage = ProfileStorage::new();
    if let Some(extra_dirs) = matches.get_many::<String>("profiles-dir") {
        for dir in extra_dirs {
            storage.add_directory(dir.into());
        }
    }

    info!("Starting printprep");
    info!("Profile directories: {:?}", storage.directories());

    iced::application(
        move || PrintPrep::with_config(storage.clone(), GuiSettings::load()),
        PrintPrep::update,
        PrintPrep::view,
    )
    .subscription(PrintPrep::subscription)
    .run()
}
