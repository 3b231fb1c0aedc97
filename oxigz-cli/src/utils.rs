//! Utility functions for the CLI.

use dialoguer::Confirm;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

/// Suffixes stripped from the input name, with their replacement.
const SUFFIXES: [(&str, &str); 4] = [(".tgz", ".tar"), (".gz", ""), ("-gz", ""), (".z", "")];

/// Output path for `input` when none was given: the input name minus its
/// gzip suffix, in the same directory.
pub fn default_output_path(input: &Path) -> Option<PathBuf> {
    let file_name = input.file_name()?.to_str()?;
    let lower = file_name.to_ascii_lowercase();

    SUFFIXES.iter().find_map(|(suffix, replacement)| {
        let stem_len = lower.strip_suffix(suffix)?.len();
        if stem_len == 0 {
            return None;
        }
        let stem = &file_name[..stem_len];
        Some(input.with_file_name(format!("{}{}", stem, replacement)))
    })
}

/// Output path built from the file name stored in the header.
///
/// Only the final component of the stored name is used, placed next to the
/// input, so a stored `../x` cannot escape the input's directory.
pub fn stored_name_path(input: &Path, stored: &str) -> Option<PathBuf> {
    let base = Path::new(stored).file_name()?;
    if base.is_empty() {
        return None;
    }
    Some(input.with_file_name(base))
}

/// Ask before overwriting `path`. Without a terminal the answer is no.
pub fn confirm_overwrite(path: &Path) -> Result<bool, dialoguer::Error> {
    if !io::stdin().is_terminal() {
        return Ok(false);
    }

    Confirm::new()
        .with_prompt(format!("{} already exists. Overwrite?", path.display()))
        .default(false)
        .interact()
}

/// Space saved by compression, as a percentage of the original size.
pub fn space_savings(compressed: u64, original: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("dir/data.txt.gz")),
            Some(PathBuf::from("dir/data.txt"))
        );
        assert_eq!(
            default_output_path(Path::new("backup.TGZ")),
            Some(PathBuf::from("backup.tar"))
        );
        assert_eq!(
            default_output_path(Path::new("notes-gz")),
            Some(PathBuf::from("notes"))
        );
        assert_eq!(default_output_path(Path::new("data.bin")), None);
        assert_eq!(default_output_path(Path::new(".gz")), None);
    }

    #[test]
    fn test_stored_name_path() {
        assert_eq!(
            stored_name_path(Path::new("in/download.gz"), "report.pdf"),
            Some(PathBuf::from("in/report.pdf"))
        );
        assert_eq!(
            stored_name_path(Path::new("in/download.gz"), "../../etc/passwd"),
            Some(PathBuf::from("in/passwd"))
        );
        assert_eq!(stored_name_path(Path::new("in/download.gz"), ".."), None);
        assert_eq!(stored_name_path(Path::new("in/download.gz"), ""), None);
    }

    #[test]
    fn test_space_savings() {
        assert_eq!(space_savings(50, 100), 50.0);
        assert_eq!(space_savings(10, 0), 0.0);
    }
}
