use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// A convenience wrapper for a block of PEM-encoded bytes.
///
/// Callers never build one of these directly; they come out of [`crate::CA`]
/// and [`crate::LeafCert`] as the PEM material those types generate. The
/// contents are fixed at construction and equality is byte-for-byte.
#[derive(Clone, PartialEq, Eq)]
pub struct Blob {
    data: Vec<u8>,
}

impl Blob {
    pub(crate) fn new(data: Vec<u8>) -> Self {
        Blob { data }
    }

    /// The raw bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Write the bytes to the file at `path`.
    ///
    /// With `append` set, the bytes are appended to any existing file;
    /// otherwise an existing file is replaced.
    pub fn write_to_path(&self, path: impl AsRef<Path>, append: bool) -> Result<()> {
        let mut options = OpenOptions::new();
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        let mut file = options.create(true).open(path)?;
        file.write_all(&self.data)?;
        Ok(())
    }

    /// Run `f` with the path of a temporary `.pem` file holding the bytes.
    ///
    /// Some TLS APIs only accept certificate material as filesystem paths,
    /// so even data already in memory has to take a detour through disk.
    /// The file is written and its handle closed before `f` runs, and it is
    /// deleted when `f` returns, whether `f` succeeds or fails.
    pub fn with_tempfile<T>(&self, f: impl FnOnce(&Path) -> Result<T>) -> Result<T> {
        let mut file = tempfile::Builder::new().suffix(".pem").tempfile()?;
        file.write_all(&self.data)?;
        file.flush()?;
        // Closes the handle but keeps delete-on-drop, so the path stays
        // usable by consumers that re-open the file (Windows included).
        let path = file.into_temp_path();
        let result = f(&path);
        let removed = path.close();
        let value = result?;
        removed?;
        Ok(value)
    }
}

impl std::fmt::Debug for Blob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blob").field("len", &self.data.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::path::PathBuf;

    #[test]
    fn bytes_round_trip() {
        let blob = Blob::new(b"some pem bytes".to_vec());
        assert_eq!(blob.bytes(), b"some pem bytes");
        assert_eq!(blob, Blob::new(b"some pem bytes".to_vec()));
    }

    #[test]
    fn write_to_path_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("material.pem");
        std::fs::write(&path, b"old contents that are longer").unwrap();

        let blob = Blob::new(b"fresh".to_vec());
        blob.write_to_path(&path, false).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"fresh");
    }

    #[test]
    fn write_to_path_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("material.pem");

        let blob = Blob::new(b"part".to_vec());
        blob.write_to_path(&path, true).unwrap();
        blob.write_to_path(&path, true).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"partpart");
    }

    #[test]
    fn tempfile_exists_only_inside_scope() {
        let blob = Blob::new(b"scoped bytes".to_vec());
        let mut seen = PathBuf::new();
        blob.with_tempfile(|path| {
            seen = path.to_path_buf();
            assert_eq!(std::fs::read(path).unwrap(), b"scoped bytes");
            assert!(path.extension().is_some_and(|ext| ext == "pem"));
            Ok(())
        })
        .unwrap();
        assert!(!seen.exists());
    }

    #[test]
    fn tempfile_removed_when_scope_errors() {
        let blob = Blob::new(b"scoped bytes".to_vec());
        let mut seen = PathBuf::new();
        let result: Result<()> = blob.with_tempfile(|path| {
            seen = path.to_path_buf();
            Err(Error::InvalidInput("forced failure".into()))
        });
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(!seen.exists());
    }
}
