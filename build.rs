use std::fs;

fn main() {
    // Validate default config at compile time
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    // The section labels drive heading recovery, an empty set disables it silently
    let labels = table
        .get("sections")
        .and_then(|s| s.get("labels"))
        .and_then(|l| l.as_array());
    match labels {
        Some(labels) if !labels.is_empty() => {}
        _ => panic!("default_config.toml must list at least one [sections] label"),
    }
}
