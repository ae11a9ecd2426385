mod aggregate;
mod cli;
mod db;
mod error;
mod fmt;
mod models;
mod params;
mod render;
mod settings;
mod store;
mod tui;
mod web;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        cmd.print_help().ok();
        println!();
        println!("Quick start: farthing init && farthing demo && farthing serve");
        return;
    };

    let result = match command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Demo => cli::demo::run(),
        Commands::Show { user } => cli::show::run(&user),
        Commands::Tui { user } => cli::tui::run(&user),
        Commands::Serve { listen } => cli::serve::run(listen),
        Commands::Status => cli::status::run(),
        Commands::Completions { shell } => cli::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
