use std::fs::File;
use std::io::stdin;
use std::process::ExitCode;

use clap::Parser;
use log::info;

use schema_inference::chare_convert;
use schema_soa::SingleOccurrenceAutomaton;
use schema_soa::read_sequences;
use schema_utilities::SchemaError;

use crate::verbosity::VerbosityFlag;

mod verbosity;

#[derive(clap::Parser, Debug)]
#[command(
    name = "schema-learn",
    about = "Infers a regular expression from example symbol sequences, given one sequence per line"
)]
struct Cli {
    #[command(flatten)]
    verbosity: VerbosityFlag,

    /// The file containing the example sequences, standard input is read when omitted.
    filename: Option<String>,

    #[arg(long, help = "The character separating the symbols of a sequence, whitespace by default")]
    delimiter: Option<char>,

    #[arg(long, help = "Print information about the learned automaton to standard error")]
    stats: bool,
}

fn main() -> Result<ExitCode, SchemaError> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .parse_default_env()
        .init();

    let sequences = match &cli.filename {
        Some(filename) => read_sequences(File::open(filename)?, cli.delimiter)?,
        None => read_sequences(stdin().lock(), cli.delimiter)?,
    };
    info!("Learning {} example sequences", sequences.len());

    let mut automaton = SingleOccurrenceAutomaton::new();
    for sequence in sequences {
        automaton.learn(sequence);
    }

    if cli.stats {
        eprintln!("{automaton}");
        for state in automaton.states() {
            if let Some(symbol) = automaton.symbol(state) {
                eprintln!("{symbol}: {} occurrences", automaton.occurrences(state));
            }
        }
    }

    println!("{}", chare_convert(&automaton));
    Ok(ExitCode::SUCCESS)
}
