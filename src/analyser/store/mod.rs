//! Small file-system helpers used by the analyser to keep its flat data files.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

pub fn is_file<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().is_file()
}

/// remove a file; a file that is already gone is not an error
pub fn unlink<P: AsRef<Path>>(path: P) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// last non-empty line of a text file, None if the file has no content
pub fn read_last_line<P: AsRef<Path>>(path: P) -> io::Result<Option<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut last = None;
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            last = Some(line);
        }
    }
    Ok(last)
}

/// append 'line' plus a newline, creating the file when needed
pub fn append_line<P: AsRef<Path>>(path: P, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_append_and_read_last_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("weights.dat0");

        assert!(!is_file(&path));
        append_line(&path, "0 0.5").unwrap();
        append_line(&path, "1 0.75").unwrap();
        assert!(is_file(&path));
        assert_eq!(read_last_line(&path).unwrap(), Some("1 0.75".to_string()));
    }

    #[test]
    fn test_read_last_line_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty");
        fs::write(&path, "").unwrap();
        assert_eq!(read_last_line(&path).unwrap(), None);
    }

    #[test]
    fn test_unlink() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone");
        fs::write(&path, "x").unwrap();
        unlink(&path).unwrap();
        assert!(!is_file(&path));
        // second unlink is a no-op
        unlink(&path).unwrap();
    }
}
