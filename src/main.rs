fn main() {
    if let Err(err) = terryann::cli::main() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
