fn main() {
    if let Err(e) = lightscope_cli::run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
