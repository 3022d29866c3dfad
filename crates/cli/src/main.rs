fn main() -> Result<(), Box<dyn std::error::Error>> {
    forkpath_cli::run()
}
