//! Per-node numeric attributes (e.g. mean sequence length per gene)

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

/// Parse `id<TAB>value[<TAB>...]` lines; columns after the value are ignored
pub fn parse_attributes<R: BufRead>(reader: R) -> Result<HashMap<String, f64>> {
    let mut attributes = HashMap::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_no + 1))?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split('\t');
        let id = fields.next().unwrap_or_default().trim();
        let raw = fields
            .next()
            .ok_or_else(|| anyhow!("Line {} has no value for {}", line_no + 1, id))?;
        let value: f64 = raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value {:?} for {} on line {}", raw, id, line_no + 1))?;

        if attributes.insert(id.to_string(), value).is_some() {
            bail!("Duplicate id {} on line {}", id, line_no + 1);
        }
    }

    Ok(attributes)
}

/// Load per-node attributes from a tab-separated file
pub fn load_attributes(path: &str) -> Result<HashMap<String, f64>> {
    log::info!("Reading node attributes: {}", path);

    if !Path::new(path).exists() {
        return Err(anyhow!("File not found: {}", path));
    }

    let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
    let attributes = parse_attributes(BufReader::new(file))
        .with_context(|| format!("Malformed attribute file {}", path))?;

    log::info!("Loaded attributes for {} nodes", attributes.len());

    Ok(attributes)
}
