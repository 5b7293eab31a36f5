//! Whole-file read and decode for the legacy exports.

use std::path::Path;

use encoding_rs::WINDOWS_1252;

use super::layout::TextEncoding;
use super::DataError;

/// The UTF-8 byte-order mark as it appears after a single-byte decode.
const BOM_ARTIFACT: &str = "\u{ef}\u{bb}\u{bf}";

/// Read a file fully and decode it according to the layout's encoding.
///
/// Reads are whole-file; there is no streaming path.
pub fn read_to_string(path: &Path, encoding: TextEncoding) -> Result<String, DataError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => DataError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        },
    })?;
    Ok(decode(&bytes, encoding))
}

fn decode(bytes: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        TextEncoding::Windows1252 => {
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
    }
}

/// Strip the byte-order-mark artifact from a header name.
///
/// Exports written as UTF-8-with-BOM but decoded through the single-byte
/// codec carry the BOM as the three characters `ï»¿` glued to the first
/// header; a correctly decoded file may carry a literal U+FEFF instead.
/// Either way the header is unusable for schema matching until stripped.
pub fn strip_bom_artifact(name: &str) -> &str {
    name.trim_start_matches('\u{feff}')
        .trim_start_matches(BOM_ARTIFACT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_mojibake_bom_prefix() {
        assert_eq!(strip_bom_artifact("\u{ef}\u{bb}\u{bf}fund"), "fund");
    }

    #[test]
    fn strips_literal_feff_prefix() {
        assert_eq!(strip_bom_artifact("\u{feff}fundo"), "fundo");
    }

    #[test]
    fn clean_header_passes_through() {
        assert_eq!(strip_bom_artifact("reference_date"), "reference_date");
    }

    #[test]
    fn single_byte_decode_surfaces_bom_as_artifact() {
        // A UTF-8 BOM followed by "fund" seen through WINDOWS_1252.
        let bytes = [0xEF, 0xBB, 0xBF, b'f', b'u', b'n', b'd'];
        let text = decode(&bytes, TextEncoding::Windows1252);
        assert_eq!(text, "\u{ef}\u{bb}\u{bf}fund");
        assert_eq!(strip_bom_artifact(&text), "fund");
    }

    #[test]
    fn windows_1252_decodes_accented_labels() {
        // "Cartão" in WINDOWS_1252: 0xE3 is ã.
        let bytes = [b'C', b'a', b'r', b't', 0xE3, b'o'];
        assert_eq!(decode(&bytes, TextEncoding::Windows1252), "Cartão");
    }

    #[test]
    fn missing_file_is_a_typed_error() {
        let err = read_to_string(Path::new("/nonexistent/fidc.csv"), TextEncoding::Utf8)
            .unwrap_err();
        assert!(matches!(err, DataError::FileNotFound { .. }));
    }
}
