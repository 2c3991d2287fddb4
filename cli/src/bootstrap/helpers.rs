use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::events::BytesStart;
use serde::de::DeserializeOwned;

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open: {}", path.display()))?;
    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
    Ok(value)
}

pub fn get_attribute(e: &BytesStart, name: &str) -> Option<String> {
    e.try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.to_string())
}

pub fn required_attribute(e: &BytesStart, name: &str) -> Result<String> {
    get_attribute(e, name).ok_or_else(|| anyhow::anyhow!("Missing attribute: {}", name))
}

pub fn required_int_attribute(e: &BytesStart, name: &str) -> Result<i32> {
    let value = required_attribute(e, name)?;
    value
        .parse::<i32>()
        .with_context(|| format!("Attribute {} is not an integer: {}", name, value))
}
