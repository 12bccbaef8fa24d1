use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::credential::Credential;

/// Load every non-blank line of `path` as a credential, in file order.
/// Trailing `\r` and surrounding whitespace are trimmed.
pub fn load_credentials<P: AsRef<Path>>(path: P) -> Result<Vec<Credential>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut creds = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("read {}", path.display()))?;
        if let Ok(c) = Credential::new(&line) {
            creds.push(c);
        }
    }
    Ok(creds)
}
