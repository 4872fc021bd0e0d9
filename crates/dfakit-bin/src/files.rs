use std::{fs, path::Path};

use anyhow::{Context, Result};
use dfakit::{Dfa, DfaDefinition};
use log::debug;

pub fn load_definition<P: AsRef<Path>>(path: P) -> Result<DfaDefinition> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("File {} could not be read", path.display()))?;
    let definition = DfaDefinition::from_json_str(&source)
        .with_context(|| format!("Invalid automaton in {}", path.display()))?;
    Ok(definition)
}

pub fn load_dfa<P: AsRef<Path>>(path: P) -> Result<Dfa> {
    let path = path.as_ref();
    let dfa = load_definition(path)?
        .validate()
        .with_context(|| format!("Invalid automaton in {}", path.display()))?;
    debug!("loaded {} with {} states", path.display(), dfa.num_states());
    Ok(dfa)
}

// one input per line; a blank line is the empty string
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("File {} could not be read", path.display()))?;
    let inputs: Vec<String> = source.lines().map(str::to_string).collect();
    debug!("loaded {} inputs from {}", inputs.len(), path.display());
    Ok(inputs)
}

// parent directories are created as needed
pub fn write_output<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|x| !x.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn save_definition<P: AsRef<Path>>(path: P, definition: &DfaDefinition) -> Result<()> {
    let json = definition
        .to_json_string()
        .context("Failed to serialize automaton")?;
    write_output(path, &json)
}
