//! Export URL Builder
//!
//! Builds the download URL for the currently filtered project set. The
//! server renders the file; the client only assembles the query string.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use thiserror::Error;

pub const EXPORT_FORMATS: [&str; 3] = ["csv", "ods", "xls"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("nothing to export: the filtered project list is empty")]
    EmptySelection,
    #[error("unsupported export format \"{0}\"")]
    UnsupportedFormat(String),
}

/// `board/export/{format}?projects=a,b,c` for the given project names.
pub fn export_url(format: &str, names: &[&str]) -> Result<String, ExportError> {
    if !EXPORT_FORMATS.contains(&format) {
        return Err(ExportError::UnsupportedFormat(format.to_string()));
    }
    if names.is_empty() {
        return Err(ExportError::EmptySelection);
    }
    let joined = names
        .iter()
        .map(|name| utf8_percent_encode(name, NON_ALPHANUMERIC).to_string())
        .collect::<Vec<_>>()
        .join(",");
    Ok(format!("board/export/{}?projects={}", format, joined))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_url_joins_names() {
        assert_eq!(
            export_url("csv", &["prj1", "prj2"]).unwrap(),
            "board/export/csv?projects=prj1,prj2"
        );
    }

    #[test]
    fn test_export_url_encodes_names() {
        assert_eq!(
            export_url("ods", &["prj 1"]).unwrap(),
            "board/export/ods?projects=prj%201"
        );
    }

    #[test]
    fn test_export_refuses_empty_selection() {
        assert_eq!(export_url("csv", &[]), Err(ExportError::EmptySelection));
    }

    #[test]
    fn test_export_refuses_unknown_format() {
        assert_eq!(
            export_url("pdf", &["prj1"]),
            Err(ExportError::UnsupportedFormat("pdf".to_string()))
        );
    }
}
