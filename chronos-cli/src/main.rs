fn main() {
    if let Err(e) = chronos_cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
