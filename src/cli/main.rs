//! dtd-export - export a table sample as XML with a DTD and control block

use clap::Parser;
use dtd_export::cli::commands::{ExportArgs, handle_export};
use dtd_export::cli::output::{format_error, format_success};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dtd-export")]
#[command(about = "Export the first rows of a table as XML with a matching DTD")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    export: ExportArgs,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match handle_export(&cli.export) {
        Ok(outcome) => println!("{}", format_success(&outcome)),
        Err(e) => {
            eprintln!("{}", format_error(&e));
            std::process::exit(1);
        }
    }
}
