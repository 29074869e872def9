use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env;
use zonevisits::{cli::DEFAULT_REFERENCE_FILE, load_reference, ReferenceColumns};

fn main() -> Result<()> {
    // Optional single argument: path to the reference workbook
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_REFERENCE_FILE.to_string());

    let reference = load_reference(&path, &ReferenceColumns::default())
        .with_context(|| format!("loading zone reference from {}", path))?;

    // Count GUIDs that appear more than once; the last row wins at lookup time
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for zone in reference.zones() {
        *seen.entry(zone.guid.as_str()).or_default() += 1;
    }

    println!("guid\tname");
    for zone in reference.zones() {
        println!("{}\t{}", zone.guid, zone.name);
    }

    let mut duplicates: Vec<_> = seen.into_iter().filter(|(_, n)| *n > 1).collect();
    duplicates.sort();
    eprintln!("{} zones in {}", reference.len(), path);
    for (guid, n) in duplicates {
        eprintln!("duplicate GUID {} ({} rows)", guid, n);
    }

    Ok(())
}
