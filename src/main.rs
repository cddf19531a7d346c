// src/main.rs

use trigger::{cli, run};

#[tokio::main]
async fn main() {
    if let Err(err) = run(cli::parse()).await {
        if err.wants_usage() {
            eprintln!("{}", cli::USAGE);
        }
        eprintln!("trigger error: {err}");
        std::process::exit(err.exit_code());
    }
}
