use crate::cli::Cli;
use crate::config::builder::build_config;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use dihedral_plot::render::progress::ProgressReporter;
use dihedral_plot::workflows;
use tracing::{info, warn};

pub fn run(args: &Cli) -> Result<()> {
    if let Some(interphi) = args.interphi {
        warn!(
            "--interphi {} is accepted for compatibility and has no effect.",
            interphi
        );
    }

    info!("Merging configuration from defaults, file and CLI arguments...");
    let app = build_config(args)?;

    let progress_handler = if args.quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Plotting {} ({} chart)...",
        app.request.input.display(),
        app.render.variant.name()
    );
    info!("Invoking the plot workflow...");

    let summary = workflows::plot::run(&app.request, &app.render, &reporter)?;

    if let Some((first, last)) = summary.step_range {
        info!(
            "Plotted {} point(s) over steps {}..={}",
            summary.points, first, last
        );
    }
    if summary.out_of_domain > 0 {
        println!(
            "Warning: {} angle(s) lie outside [-180, 180].",
            summary.out_of_domain
        );
    }
    println!("✓ Vector figure written to: {}", summary.outputs.pdf.display());
    println!("✓ Raster figure written to: {}", summary.outputs.png.display());

    Ok(())
}
