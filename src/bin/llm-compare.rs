#[path = "llm-compare/app/mod.rs"]
mod app;
#[path = "llm-compare/args.rs"]
mod args;
#[path = "llm-compare/logging.rs"]
mod logging;

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    app::run().await
}
