fn main() {
    if let Err(e) = clientspec_cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
