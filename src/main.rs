use clap::Parser;

mod app;
mod catalog;
mod cli;
mod error;
mod inspector;

fn main() -> Result<(), error::AppError> {
    cli::Cli::parse().run()
}
