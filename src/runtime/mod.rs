use std::sync::mpsc;
use std::time::Instant;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::cli::Cli;
use crate::mpris::ControlCmd;

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;
mod startup;

use startup::StartupError;

pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings(&cli);

    let log_path = logging::init_logging(&settings.log).map_err(StartupError::from)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        log = %log_path.display(),
        "encore starting"
    );
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }

    let catalog =
        startup::load_catalog(settings.catalog.path.as_deref()).map_err(StartupError::from)?;
    let mut app = startup::build_app(catalog, &settings, Instant::now());

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = if cli.no_mpris {
        info!("MPRIS disabled");
        None
    } else {
        Some(crate::mpris::spawn_mpris(control_tx))
    };

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            mpris.as_ref(),
            &control_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("encore exiting");
    run_result
}
