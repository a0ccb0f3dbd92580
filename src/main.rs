fn main() {
    if let Err(e) = imgaug::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
