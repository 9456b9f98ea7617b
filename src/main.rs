//! Inscribe CLI entry point.

use std::ffi::OsString;
use std::process::ExitCode;

use inscribe::cli::{bootstrap_globals, App};
use inscribe::platform::is_interactive;
use inscribe::ui::create_ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// `--debug` wins over `RUST_LOG`; without either only info and above is shown.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("inscribe=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("inscribe=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();

    let early = bootstrap_globals(args.iter().cloned());
    init_tracing(early.debug);

    let cwd = std::env::current_dir().unwrap_or_default();
    let app = App::new(&cwd, &early);
    let (global, invocation) = app.parse(args);

    tracing::debug!("Inscribe starting with {:?}", invocation);

    if global.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mut ui = create_ui(is_interactive(global.non_interactive));

    match app.run(&global, invocation, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
