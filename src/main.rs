use clap::Parser;

use avisos_credito::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();
    avisos_credito::init_logging();

    if let Err(e) = cli::run(cli) {
        log::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
