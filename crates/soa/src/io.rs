use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;

use log::debug;

/// Reads example sequences from the given reader, one sequence per line.
///
/// The symbols on a line are separated by `delimiter`, or by whitespace when
/// no delimiter is given. Symbols are trimmed, empty symbols are skipped.
/// Blank lines and lines starting with `#` are ignored.
pub fn read_sequences(reader: impl Read, delimiter: Option<char>) -> io::Result<Vec<Vec<String>>> {
    let start = std::time::Instant::now();
    let mut sequences = Vec::new();

    for line in BufReader::new(reader).lines() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let symbols: Vec<String> = match delimiter {
            Some(delimiter) => line
                .split(delimiter)
                .map(str::trim)
                .filter(|symbol| !symbol.is_empty())
                .map(str::to_string)
                .collect(),
            None => line.split_whitespace().map(str::to_string).collect(),
        };

        sequences.push(symbols);
    }

    debug!(
        "Read {} sequences in {:.3}s",
        sequences.len(),
        start.elapsed().as_secs_f64()
    );
    Ok(sequences)
}
