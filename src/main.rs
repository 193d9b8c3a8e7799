use clap::Parser;
use daypad::cli::commands::Cli;
use daypad::cli::handlers;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        // No subcommand → launch TUI
        None => daypad::tui::run(cli.data.as_deref()),
        Some(_) => handlers::dispatch(cli),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
