use std::env;
use std::fs;
use std::io::{self, BufRead, Write};

use huffman_text_codec::{FreqTable, entropy_from_freq, huffman_decode};
use log::{debug, error, info};

fn path_arg(args: &[String], index: usize, prompt: &str) -> io::Result<String> {
    if let Some(path) = args.get(index) {
        return Ok(path.clone());
    }
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn read_paths(args: &[String]) -> io::Result<(String, String, String)> {
    let source = path_arg(args, 1, "Name of original source file: ")?;
    let encoded = path_arg(args, 2, "Name of encoded file: ")?;
    let output = path_arg(args, 3, "Name of output file: ")?;
    Ok((source, encoded, output))
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let (source_filepath, encoded_filepath, output_filepath) = match read_paths(&args) {
        Ok(paths) => paths,
        Err(e) => {
            error!("Could not read file names: {}", e);
            std::process::exit(1);
        }
    };

    info!("--- Start Decoding ---");

    // the tree is never stored; it is rebuilt from the source's byte counts
    let freq = match FreqTable::from_file(&source_filepath) {
        Ok(freq) => freq,
        Err(e) => {
            error!("Failed to count frequencies of {}: {}", source_filepath, e);
            std::process::exit(1);
        }
    };
    debug!(
        "Reconstructed frequency map with {} unique symbols.",
        freq.distinct_count()
    );

    if let Err(e) = huffman_decode(&freq, &encoded_filepath, &output_filepath) {
        error!("Decoding failed: {}", e);
        std::process::exit(1);
    }

    info!("Write successful.");

    let input_size = fs::metadata(&encoded_filepath).map(|m| m.len()).unwrap_or(0);
    let output_size = fs::metadata(&output_filepath).map(|m| m.len()).unwrap_or(0);

    println!(
        "\r\n✅ decoding successful.\n\
         📂 input file:        {} ({} bits)\n\
         💾 output file:       {} ({} bytes)\n\
         ℹ️ entropy:           {:.2} bits/symbol",
        encoded_filepath,
        input_size,
        output_filepath,
        output_size,
        entropy_from_freq(&freq)
    );

    info!("--- End ---");
}
