//! YAML file loading.
//!
//! Files and stdin may be gzip compressed: files are recognised by a `.gz`
//! extension, stdin by the gzip magic bytes. Every document of the stream
//! becomes its own [`Tree`].

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::document::parser::parse_yaml;
use crate::document::tree::Tree;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Loads and parses a YAML file from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use yit::file::loader::load_yaml_file;
///
/// let trees = load_yaml_file("deploy.yaml").unwrap();
/// for tree in &trees {
///     println!("{} nodes", tree.len());
/// }
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file cannot be read (missing, permissions, etc.)
/// - A `.gz` file is not valid gzip
/// - The contents are not valid YAML
pub fn load_yaml_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    debug!(path = %path_ref.display(), gzipped = is_gzipped, bytes = content.len(), "read input");
    load_yaml_str(&content).with_context(|| format!("Invalid YAML in {}", path_ref.display()))
}

/// Reads YAML from standard input until EOF.
///
/// # Errors
///
/// Fails if stdin cannot be read, is neither UTF-8 nor gzip, or is not
/// valid YAML.
pub fn load_yaml_from_stdin() -> Result<Vec<Tree>> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    load_yaml_bytes(buffer).context("Invalid YAML on stdin")
}

/// Parses raw bytes, decompressing them first when they start with the gzip magic.
pub fn load_yaml_bytes(bytes: Vec<u8>) -> Result<Vec<Tree>> {
    let content = if bytes.starts_with(&GZIP_MAGIC) {
        decompress_gzip_bytes(&bytes)?
    } else {
        String::from_utf8(bytes).context("Input is not valid UTF-8")?
    };
    load_yaml_str(&content)
}

pub fn load_yaml_str(content: &str) -> Result<Vec<Tree>> {
    parse_yaml(content)
}

/// Reads and decompresses a gzipped file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid gzip format (corrupted)
/// - The decompressed content is not valid UTF-8
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(text: &str) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_load_bytes_plain_and_gzipped() {
        let text = "a: 1\n---\nb: 2\n";

        assert_eq!(load_yaml_bytes(text.as_bytes().to_vec()).unwrap().len(), 2);
        assert_eq!(load_yaml_bytes(gzip(text)).unwrap().len(), 2);
    }

    #[test]
    fn test_load_bytes_rejects_invalid_utf8() {
        let result = load_yaml_bytes(vec![0xff, 0xfe, 0x00]);
        assert!(result.unwrap_err().to_string().contains("UTF-8"));
    }

    #[test]
    fn test_read_gzipped_file_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let gz_path = dir.path().join("broken.yaml.gz");
        fs::write(&gz_path, b"not gzip data").unwrap();

        let err_msg = read_gzipped_file(&gz_path).unwrap_err().to_string();
        assert!(err_msg.contains("decompress") || err_msg.contains("corrupted"));
    }

    #[test]
    fn test_load_gzipped_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let gz_path = dir.path().join("doc.yaml.gz");
        fs::write(&gz_path, gzip("name: yit\nitems: [1, 2]\n")).unwrap();

        let trees = load_yaml_file(&gz_path).unwrap();
        assert_eq!(trees.len(), 1);
        assert_eq!(trees[0].root().unwrap().len(), 4);
    }
}
