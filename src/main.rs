fn main() {
    if let Err(err) = sheet2yml::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
