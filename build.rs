use std::fs;

const DEFAULT_CONFIG: &str = "src/default_config.toml";
const REQUIRED_SECTIONS: [&str; 2] = ["site", "paths"];

fn main() {
    println!("cargo:rerun-if-changed={DEFAULT_CONFIG}");

    let content = fs::read_to_string(DEFAULT_CONFIG)
        .unwrap_or_else(|e| panic!("Failed to read {DEFAULT_CONFIG}: {e}"));

    // Config::compiled_default() parses this at runtime, so reject anything
    // that would make it fall over there.
    let table = content
        .parse::<toml::Table>()
        .unwrap_or_else(|e| panic!("Invalid {DEFAULT_CONFIG}: {e}"));

    for section in REQUIRED_SECTIONS {
        if !table.get(section).is_some_and(toml::Value::is_table) {
            panic!("{DEFAULT_CONFIG} is missing the [{section}] table");
        }
    }
}
