// Calendar grid layout CLI
// Main entry point

use calendar_grid_layout::cli::{self, Args};

fn main() {
    // Initialize logging
    env_logger::init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match Args::parse(&argv) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}\n\n{}", err, cli::USAGE);
            std::process::exit(2);
        }
    };

    log::info!("Starting grid layout for {:?}", args.period);

    match cli::run(&args) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            log::error!("Layout failed: {:#}", err);
            eprintln!("error: {:#}", err);
            std::process::exit(1);
        }
    }
}
