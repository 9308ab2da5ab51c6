mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use fltr::logging;
use settings::ResolvedConfig;
use workflow::FilterWorkflow;

fn main() -> Result<()> {
    let cli = parse_cli();

    if cli.list_themes {
        for name in fltr::tui::theme::names() {
            println!("{name}");
        }
        return Ok(());
    }

    if cli.no_ui {
        logging::initialize_stderr(cli.verbose)?;
    } else {
        logging::initialize()?;
    }

    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    run_filters(cli.output, cli.no_ui, resolved)
}

/// Execute the filter workflow and print output in the chosen format.
fn run_filters(format: OutputFormat, headless: bool, settings: ResolvedConfig) -> Result<()> {
    let workflow = FilterWorkflow::from_config(settings)?;
    let outcome = workflow.run(headless)?;

    match format {
        OutputFormat::Plain => print_plain(&outcome),
        OutputFormat::Json => print_json(&outcome)?,
    }

    Ok(())
}
