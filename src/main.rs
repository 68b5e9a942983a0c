fn main() {
    if let Err(err) = svg_report_compose::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
