use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use ong_explorer::app::App;
use ong_explorer::catalog::{Catalog, CountryMatch, FilterCriteria};
use ong_explorer::config::{self, Cli, Command};
use ong_explorer::map::MapRenderer;
use ong_explorer::{data, hdi, ui};
use ratatui::DefaultTerminal;
use std::time::Duration;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(command) => {
            config::init_stderr_logging();
            run_command(&cli.catalog, command)
        }
        None => {
            config::init_file_logging(&cli.log_file)?;
            run_dashboard(&cli)
        }
    }
}

/// Headless subcommands
fn run_command(catalog_path: &std::path::Path, command: Command) -> Result<()> {
    match command {
        Command::Search {
            country,
            domains,
            name,
            exact,
        } => {
            let catalog = Catalog::load(catalog_path)
                .with_context(|| format!("loading catalog {}", catalog_path.display()))?;
            let mode = if exact { CountryMatch::Member } else { CountryMatch::Contains };
            let criteria = FilterCriteria::default()
                .with_country(&country, mode)
                .with_domains(domains)
                .with_name(&name);

            let found = catalog.search(&criteria);
            println!("{} ONG trouvées", found.len());
            for record in found {
                println!(
                    "{}\t{}\t{}\t{}",
                    record.name,
                    record.domain,
                    record.country,
                    record.donation_url.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Colorize { regions } => {
            for region in regions {
                let band = hdi::color_for(&region);
                let index = hdi::development_index(&region)
                    .map(|v| format!("{v:.3}"))
                    .unwrap_or_else(|| "-".to_string());
                println!("{region}\t{index}\t{}\t{}", band.hex(), band.label());
            }
        }
    }
    Ok(())
}

fn run_dashboard(cli: &Cli) -> Result<()> {
    // The catalog is required; boundaries are optional
    let catalog = Catalog::load(&cli.catalog).with_context(|| format!("loading catalog {}", cli.catalog.display()))?;
    let regions = data::load_regions_or_empty(&cli.world);
    let mut app = App::new(catalog, MapRenderer::new(regions));

    // Initialize terminal
    let mut terminal = ratatui::init();
    terminal.clear()?;

    // Enable mouse capture
    execute!(std::io::stdout(), EnableMouseCapture)?;

    // Run the app
    let result = run(&mut terminal, &mut app);

    // Disable mouse capture and restore terminal
    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    info!("dashboard closed");
    result
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    info!("dashboard started");

    // Main loop
    loop {
        // Draw
        terminal.draw(|frame| ui::render(frame, app))?;

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                // Resize is picked up by the next draw
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
