use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// Open the named file, or stdin when no file is given.
pub fn open_input(file: Option<&Path>) -> Result<Box<dyn Read>> {
    match file {
        Some(path) => {
            let f = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(f)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Human-readable name of the input, for messages.
pub fn input_name(file: Option<&Path>) -> String {
    match file {
        Some(path) => path.display().to_string(),
        None => "<stdin>".to_string(),
    }
}
