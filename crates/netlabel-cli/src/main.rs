use clap::Parser;
use netlabel_core::LabelError;

mod place;
mod settings;
mod ui;

#[derive(Parser)]
#[command(name = "netlabel")]
#[command(
    about = "Insert net labels from a CSV file into a KiCad schematic",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    place: place::PlaceArgs,
}

/// Exit status for bad input (configuration or CSV header problems).
const EXIT_INPUT_ERROR: i32 = 2;

fn main() {
    // Initialize logger
    env_logger::init();

    let cli = Cli::parse();

    if let Err(err) = place::execute(cli.place) {
        eprintln!("{} {err:#}", ui::icons::error());
        let code = match err.downcast_ref::<LabelError>() {
            Some(label_err) if label_err.is_input_error() => EXIT_INPUT_ERROR,
            _ => 1,
        };
        std::process::exit(code);
    }
}
