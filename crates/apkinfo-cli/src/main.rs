use clap::Parser;
use logging::setup_logging;
use tracing::{error, info};

mod cli;
mod logging;
mod utils;

fn handle_cli() -> apkinfo_core::Result<()> {
    let args = cli::Args::parse();

    setup_logging(&args);

    if args.no_color {
        let mut color = utils::COLOR.write().unwrap();
        *color = false;
    }

    for package in &args.packages {
        // Extraction faults are per-item: report and move on. Only renderer
        // faults abort the whole run.
        let info = match apkinfo_core::extract(package) {
            Ok(info) => info,
            Err(err) => {
                error!("{err}");
                continue;
            }
        };

        info!("displaying info as image...");
        apkinfo_core::render::render(&info)?;
    }

    Ok(())
}

fn main() {
    // Install miette's fancy error handler for beautiful error output
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
