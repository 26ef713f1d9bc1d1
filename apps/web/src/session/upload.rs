use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

/// Form field carrying the selected file.
pub const FILE_FIELD: &str = "file";

/// A user-selected survey file, kept as uploaded until analysis reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyFile {
    pub name: String,
    pub content: Bytes,
}

impl SurveyFile {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Decodes the content as UTF-8 text. A leading byte-order mark is dropped.
    pub fn read_text(&self) -> Result<String, AppError> {
        let text = std::str::from_utf8(&self.content)
            .map_err(|e| AppError::FileRead(format!("'{}' is not valid UTF-8: {e}", self.name)))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        if text.is_empty() {
            return Err(AppError::FileRead(format!("'{}' has no content", self.name)));
        }
        Ok(text.to_string())
    }
}

/// Reads the file selection from a multipart form.
/// Returns `None` when the user submitted the form with no file chosen.
pub async fn read_selection(mut multipart: Multipart) -> Result<Option<SurveyFile>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        if name.is_empty() {
            return Ok(None);
        }
        return Ok(Some(SurveyFile::new(name, content)));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_text() {
        let file = SurveyFile::new("survey.txt", "Loved it 5");
        assert_eq!(file.read_text().unwrap(), "Loved it 5");
    }

    #[test]
    fn test_read_text_strips_bom() {
        let file = SurveyFile::new("survey.csv", b"\xef\xbb\xbfscore\n5".to_vec());
        assert_eq!(file.read_text().unwrap(), "score\n5");
    }

    #[test]
    fn test_invalid_utf8_is_a_read_error() {
        let file = SurveyFile::new("survey.xlsx", vec![0x50u8, 0x4b, 0xff, 0xfe]);
        assert!(matches!(file.read_text(), Err(AppError::FileRead(_))));
    }

    #[test]
    fn test_empty_file_is_a_read_error() {
        let file = SurveyFile::new("empty.txt", Bytes::new());
        assert!(matches!(file.read_text(), Err(AppError::FileRead(_))));
    }

    #[test]
    fn test_whitespace_only_file_is_read() {
        let file = SurveyFile::new("blank.txt", b"  \n".to_vec());
        assert_eq!(file.read_text().unwrap(), "  \n");
    }
}
