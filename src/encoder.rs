use std::env;
use std::fs;
use std::io::{self, BufRead, Write};

use huffman_text_codec::{entropy_from_freq, huffman_encode};
use log::{error, info};

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

fn read_paths(args: &[String]) -> io::Result<(String, String)> {
    let input = path_arg(args, 1, "Name of input file: ")?;
    let output = path_arg(args, 2, "Name of output file: ")?;
    Ok((input, output))
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let (input_filepath, output_filepath) = match read_paths(&args) {
        Ok(paths) => paths,
        Err(e) => {
            error!("Could not read file names: {}", e);
            std::process::exit(1);
        }
    };

    info!("--- Start Encoding ---");

    let freq = match huffman_encode(&input_filepath, &output_filepath) {
        Ok(freq) => freq,
        Err(e) => {
            error!("Encoding failed: {}", e);
            std::process::exit(1);
        }
    };

    let input_size = fs::metadata(&input_filepath).map(|m| m.len()).unwrap_or(0);
    let output_size = fs::metadata(&output_filepath).map(|m| m.len()).unwrap_or(0);
    let bits_per_symbol = if input_size > 0 {
        output_size as f64 / input_size as f64
    } else {
        0.0
    };

    println!(
        "\r\n✅ Encoding successful.\n\
         📂  Input:       {} ({} bytes, {} distinct)\n\
         💾  Output:      {} ({} bits)\n\
         ℹ️  Entropy:     {:.4} bits/symbol\n\
         🗜️  Code length: {:.4} bits/symbol",
        input_filepath,
        input_size,
        freq.distinct_count(),
        output_filepath,
        output_size,
        entropy_from_freq(&freq),
        bits_per_symbol
    );

    info!("--- End ---");
}
