//! Header-only reader for `.safetensors` files.
//!
//! Layout: an 8-byte little-endian header length, a JSON header mapping
//! tensor names to `{dtype, shape, data_offsets}`, then the raw tensor
//! bytes. Only the first two parts are read; tensor data is never loaded.

use crate::hierarchy::{element_count, Shape};
use crate::utils::config::{HEADER_LEN_BYTES, MAX_HEADER_SIZE, METADATA_KEY, SUPPORTED_FILE_EXTS};
use crate::utils::error::ReadError;
use log::{debug, info};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Name, dtype and shape of one stored tensor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorSpec {
    pub name: String,
    pub dtype: String,
    pub shape: Shape,
}

impl TensorSpec {
    pub fn element_count(&self) -> u64 {
        element_count(&self.shape)
    }
}

/// Per-tensor header entry as stored on disk
#[derive(Debug, Deserialize)]
struct RawTensorInfo {
    dtype: String,
    shape: Vec<usize>,
    data_offsets: (u64, u64),
}

/// Bytes per element for a safetensors dtype tag
///
/// **Private** - unknown tags make the entry invalid
fn dtype_size(dtype: &str) -> Option<u64> {
    match dtype {
        "BOOL" | "U8" | "I8" | "F8_E5M2" | "F8_E4M3" => Some(1),
        "U16" | "I16" | "F16" | "BF16" => Some(2),
        "U32" | "I32" | "F32" => Some(4),
        "U64" | "I64" | "F64" => Some(8),
        _ => None,
    }
}

/// Check whether a path has a supported extension (case-insensitive)
///
/// **Public** - used to reject files before they reach the reader
pub fn is_supported_file(path: impl AsRef<Path>) -> bool {
    let name = path.as_ref().to_string_lossy().to_lowercase();
    SUPPORTED_FILE_EXTS.iter().any(|ext| name.ends_with(ext))
}

/// Read tensor names and shapes from a safetensors file
///
/// **Public** - main entry point of the input boundary
///
/// # Arguments
/// * `path` - Path to a `.safetensors` file
///
/// # Returns
/// Tensor specs sorted by name. The file is closed before this returns,
/// on success and on failure.
///
/// # Errors
/// * `ReadError::UnsupportedExtension` - wrong file type, nothing was opened
/// * `ReadError::Io` - missing or unreadable file
/// * `ReadError::InvalidHeader` - truncated file or implausible header length
/// * `ReadError::Json` - header is not a JSON object
/// * `ReadError::InvalidTensor` - malformed tensor entry
pub fn read_tensor_specs(path: impl AsRef<Path>) -> Result<Vec<TensorSpec>, ReadError> {
    let path = path.as_ref();

    if !is_supported_file(path) {
        return Err(ReadError::UnsupportedExtension(path.to_path_buf()));
    }

    info!("Reading tensor header from: {}", path.display());

    let (header, data_len) = read_header_bytes(path)?;
    let specs = parse_header(&header, data_len)?;

    info!("Found {} tensors", specs.len());
    Ok(specs)
}

/// Read the raw JSON header and the size of the data section
///
/// **Private** - the file handle lives only inside this function
fn read_header_bytes(path: &Path) -> Result<(Vec<u8>, u64), ReadError> {
    let io_err = |source: std::io::Error| ReadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_err)?;
    let file_len = file.metadata().map_err(io_err)?.len();

    let mut len_buf = [0u8; HEADER_LEN_BYTES];
    file.read_exact(&mut len_buf).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => ReadError::InvalidHeader(format!(
            "file is {} bytes, too small for a header",
            file_len
        )),
        _ => io_err(e),
    })?;

    let header_len = u64::from_le_bytes(len_buf);
    if header_len > MAX_HEADER_SIZE {
        return Err(ReadError::InvalidHeader(format!(
            "header length {} exceeds limit of {} bytes",
            header_len, MAX_HEADER_SIZE
        )));
    }

    let available = file_len.saturating_sub(HEADER_LEN_BYTES as u64);
    if header_len > available {
        return Err(ReadError::InvalidHeader(format!(
            "header length {} exceeds remaining file size {}",
            header_len, available
        )));
    }

    debug!("Header is {} bytes, file is {} bytes", header_len, file_len);

    let mut header = vec![0u8; header_len as usize];
    file.read_exact(&mut header).map_err(io_err)?;

    Ok((header, available - header_len))
}

/// Parse a safetensors JSON header
///
/// **Public** - useful for in-memory headers and tests
///
/// # Arguments
/// * `header` - JSON header bytes
/// * `data_len` - Size of the data section following the header
///
/// # Returns
/// Tensor specs sorted by name, `__metadata__` skipped
///
/// Each entry must name a known dtype and its offsets must span exactly
/// `element_count * dtype size` bytes inside the data section.
pub fn parse_header(header: &[u8], data_len: u64) -> Result<Vec<TensorSpec>, ReadError> {
    let entries: BTreeMap<String, serde_json::Value> = serde_json::from_slice(header)?;

    let mut specs = Vec::with_capacity(entries.len());
    for (name, value) in entries {
        if name == METADATA_KEY {
            debug!("Skipping header metadata entry");
            continue;
        }

        let raw: RawTensorInfo =
            serde_json::from_value(value).map_err(|e| ReadError::InvalidTensor {
                name: name.clone(),
                reason: e.to_string(),
            })?;

        let (start, end) = raw.data_offsets;
        if start > end || end > data_len {
            return Err(ReadError::InvalidTensor {
                name,
                reason: format!(
                    "data offsets [{}, {}] outside data section of {} bytes",
                    start, end, data_len
                ),
            });
        }

        let size = dtype_size(&raw.dtype).ok_or_else(|| ReadError::InvalidTensor {
            name: name.clone(),
            reason: format!("unknown dtype '{}'", raw.dtype),
        })?;
        let expected = element_count(&raw.shape).checked_mul(size);
        if expected != Some(end - start) {
            return Err(ReadError::InvalidTensor {
                name,
                reason: format!(
                    "{} bytes of data do not hold {:?} of {}",
                    end - start,
                    raw.shape,
                    raw.dtype
                ),
            });
        }

        debug!("{} -> {:?} ({})", name, raw.shape, raw.dtype);
        specs.push(TensorSpec {
            name,
            dtype: raw.dtype,
            shape: raw.shape,
        });
    }

    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(header: &str, data_len: usize) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".safetensors")
            .tempfile()
            .unwrap();
        file.write_all(&(header.len() as u64).to_le_bytes()).unwrap();
        file.write_all(header.as_bytes()).unwrap();
        file.write_all(&vec![0u8; data_len]).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_is_supported_file() {
        assert!(is_supported_file("model.safetensors"));
        assert!(is_supported_file("/tmp/MODEL.SafeTensors"));
        assert!(!is_supported_file("model.bin"));
        assert!(!is_supported_file("safetensors"));
    }

    #[test]
    fn test_parse_header_skips_metadata() {
        let header = br#"{
            "__metadata__": {"format": "pt"},
            "b.weight": {"dtype": "F32", "shape": [2, 2], "data_offsets": [0, 16]},
            "a": {"dtype": "I64", "shape": [], "data_offsets": [16, 24]}
        }"#;

        let specs = parse_header(header, 24).unwrap();

        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].name, "a");
        assert_eq!(specs[0].shape, Vec::<usize>::new());
        assert_eq!(specs[0].element_count(), 1);
        assert_eq!(specs[1].name, "b.weight");
        assert_eq!(specs[1].dtype, "F32");
        assert_eq!(specs[1].element_count(), 4);
    }

    #[test]
    fn test_parse_header_rejects_out_of_range_offsets() {
        let header = br#"{"w": {"dtype": "F32", "shape": [4], "data_offsets": [0, 16]}}"#;
        let err = parse_header(header, 8).unwrap_err();
        assert!(matches!(err, ReadError::InvalidTensor { ref name, .. } if name == "w"));
    }

    #[test]
    fn test_parse_header_rejects_reversed_offsets() {
        let header = br#"{"w": {"dtype": "F32", "shape": [2], "data_offsets": [16, 8]}}"#;
        let err = parse_header(header, 16).unwrap_err();
        assert!(matches!(err, ReadError::InvalidTensor { ref name, .. } if name == "w"));
    }

    #[test]
    fn test_parse_header_rejects_size_mismatch() {
        // [4] of F32 needs 16 bytes
        let header = br#"{"w": {"dtype": "F32", "shape": [4], "data_offsets": [0, 12]}}"#;
        let err = parse_header(header, 16).unwrap_err();
        assert!(matches!(err, ReadError::InvalidTensor { ref name, .. } if name == "w"));

        let header = br#"{"w": {"dtype": "BF16", "shape": [4], "data_offsets": [0, 8]}}"#;
        assert_eq!(parse_header(header, 8).unwrap()[0].element_count(), 4);
    }

    #[test]
    fn test_parse_header_rejects_unknown_dtype() {
        let header = br#"{"w": {"dtype": "Q4_K", "shape": [4], "data_offsets": [0, 16]}}"#;
        let err = parse_header(header, 16).unwrap_err();
        assert!(matches!(err, ReadError::InvalidTensor { ref reason, .. } if reason.contains("Q4_K")));
    }

    #[test]
    fn test_parse_header_rejects_bad_entry() {
        let header = br#"{"w": {"dtype": "F32", "shape": "four"}}"#;
        assert!(matches!(
            parse_header(header, 0),
            Err(ReadError::InvalidTensor { .. })
        ));
    }

    #[test]
    fn test_parse_header_rejects_non_object() {
        assert!(matches!(parse_header(b"[1, 2]", 0), Err(ReadError::Json(_))));
    }

    #[test]
    fn test_read_tensor_specs_from_file() {
        let file = write_file(
            r#"{"layer.weight":{"dtype":"F32","shape":[4,3],"data_offsets":[0,48]}}"#,
            48,
        );

        let specs = read_tensor_specs(file.path()).unwrap();

        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "layer.weight");
        assert_eq!(specs[0].shape, vec![4, 3]);
    }

    #[test]
    fn test_read_rejects_truncated_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".safetensors")
            .tempfile()
            .unwrap();
        file.write_all(&[1, 2, 3]).unwrap();
        file.flush().unwrap();

        assert!(matches!(
            read_tensor_specs(file.path()),
            Err(ReadError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_read_rejects_header_longer_than_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".safetensors")
            .tempfile()
            .unwrap();
        file.write_all(&1_000u64.to_le_bytes()).unwrap();
        file.write_all(b"{}").unwrap();
        file.flush().unwrap();

        assert!(matches!(
            read_tensor_specs(file.path()),
            Err(ReadError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_read_rejects_oversized_header_length() {
        let mut file = tempfile::Builder::new()
            .suffix(".safetensors")
            .tempfile()
            .unwrap();
        file.write_all(&(MAX_HEADER_SIZE + 1).to_le_bytes()).unwrap();
        file.write_all(b"{}").unwrap();
        file.flush().unwrap();

        let err = read_tensor_specs(file.path()).unwrap_err();
        assert!(matches!(err, ReadError::InvalidHeader(ref msg) if msg.contains("exceeds limit")));
    }

    #[test]
    fn test_read_rejects_wrong_extension() {
        let file = NamedTempFile::new().unwrap();
        assert!(matches!(
            read_tensor_specs(file.path()),
            Err(ReadError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_tensor_specs("/nonexistent/dir/model.safetensors"),
            Err(ReadError::Io { .. })
        ));
    }
}
