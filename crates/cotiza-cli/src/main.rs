use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod cmd;
mod error;
mod io;

#[derive(Parser)]
#[command(name = "cotiza", about = "Comparador de listas de precios por proveedor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge supplier price lists, rank prices, and report ties
    Compare {
        /// One .xlsx price list per supplier; supplier = file name stem
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Decimal digits for tie detection (0-6)
        #[arg(long, default_value_t = 2)]
        precision: u8,

        /// Print the quote set as JSON instead of the readable report
        #[arg(long)]
        json: bool,

        /// Directory to write the summary workbook into
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Replay tie resolutions and quantities into an order workbook
    Order {
        /// One .xlsx price list per supplier; supplier = file name stem
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// JSON file mapping SKU to chosen supplier for tied products
        #[arg(long)]
        resolutions: Option<PathBuf>,

        /// JSON file with [{supplier, sku, quantity}] entries
        #[arg(long)]
        quantities: Option<PathBuf>,

        /// Decimal digits for tie detection (0-6)
        #[arg(long, default_value_t = 2)]
        precision: u8,

        /// Directory to write the order workbook into
        #[arg(long, default_value = "resultados")]
        out: PathBuf,
    },

    /// Print the cotiza-core library version
    Version,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Compare {
            files,
            precision,
            json,
            out,
        } => cmd::compare::run(&files, precision, json, out.as_deref()),
        Command::Order {
            files,
            resolutions,
            quantities,
            precision,
            out,
        } => cmd::order::run(
            &files,
            resolutions.as_deref(),
            quantities.as_deref(),
            precision,
            &out,
        ),
        Command::Version => {
            println!("{}", cotiza_core::version());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(e.exit_code());
    }
}
