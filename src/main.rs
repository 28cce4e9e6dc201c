use {
    huffcode::{decompress, Coder},
    std::{env, error::Error, fs, process, time::Instant},
};

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("compress") if args.len() == 5 => compress_file(&args[2], &args[3], &args[4]),
        Some("decompress") if args.len() == 4 => decompress_file(&args[2], &args[3]),
        _ => print_usage(),
    }
}

fn print_usage() -> ! {
    println!("Usage:");
    println!("  huffcode compress <input> <output> <codes>    Compress <input> into <output>, writing the code table to <codes>");
    println!("  huffcode decompress <input> <output>          Decompress a file written by compress");
    process::exit(1)
}

fn compress_file(input: &str, output: &str, codes: &str) -> Result<(), Box<dyn Error>> {
    let message = fs::read(input)?;
    let start = Instant::now();

    let coder = Coder::build(&message)?;
    let container = coder.container();
    fs::write(output, &container)?;
    fs::write(codes, format!("{:?}", coder.code_table()))?;

    let encode_time = start.elapsed();
    let input_size = message.len() as f64;
    let output_size = container.len() as f64;
    println!("File Size: {} KB", input_size / 1024.0);
    println!("Compressed File Size: {} KB", output_size / 1024.0);
    println!("Compression Ratio: {}%", (output_size / input_size) * 100.0);
    println!("Time(No Decode): {} ms", encode_time.as_millis());

    // Read the compressed file back and make sure it decodes to the input.
    let decoded = decompress(&fs::read(output)?)?;
    if decoded != message {
        eprintln!("round trip mismatch: {} does not decode back to {}", output, input);
        process::exit(1);
    }
    println!("Time(with Decode): {} ms", start.elapsed().as_millis());

    Ok(())
}

fn decompress_file(input: &str, output: &str) -> Result<(), Box<dyn Error>> {
    let message = decompress(&fs::read(input)?)?;
    fs::write(output, message)?;
    Ok(())
}
