/// Default CLI version (from Cargo.toml)
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_line() -> String {
    format!("Gover API Generator v{}", VERSION)
}

pub fn run_version() {
    println!("{}", version_line());
}
