// src/main.rs
mod app;
mod color;
mod config;
mod fixed;
mod grid;
mod input;
mod render;
mod sim;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = config::Args::parse();
    app::run(args)
}
