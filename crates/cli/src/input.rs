// Input table reading

use std::io::Read;
use std::path::Path;

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            tracing::debug!(path = %path.display(), "not UTF-8, decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };

    // Spreadsheet exports often start with a BOM, which would rename the first column
    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.txt");
        fs::write(&path, "ID\tI2\nrs1\t10\n").unwrap();
        assert_eq!(read_file_as_utf8(&path).unwrap(), "ID\tI2\nrs1\t10\n");
    }

    #[test]
    fn strips_bom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.txt");
        fs::write(&path, "\u{feff}ID\tI2\n").unwrap();
        assert_eq!(read_file_as_utf8(&path).unwrap(), "ID\tI2\n");
    }

    #[test]
    fn falls_back_to_windows_1252() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.txt");
        // "caf\xe9" is "café" in Windows-1252 and invalid UTF-8
        fs::write(&path, b"ID\nrs_caf\xe9\n").unwrap();
        assert_eq!(read_file_as_utf8(&path).unwrap(), "ID\nrs_café\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(read_file_as_utf8(&dir.path().join("absent.txt")).is_err());
    }
}
