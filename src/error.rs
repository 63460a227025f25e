use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A Win32 call failed; `code` is the `GetLastError()` value or HRESULT.
    #[error("{function} failed (error {code:#010x})")]
    Win32 { function: &'static str, code: u32 },

    #[error("Dialog error: {0}")]
    Dialog(String),
}

#[cfg(windows)]
impl From<windows::core::Error> for AppError {
    fn from(e: windows::core::Error) -> Self {
        Self::Win32 {
            function: "COM",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_win32_error_display() {
        let err = AppError::Win32 {
            function: "CreateWindowExW",
            code: 5,
        };
        assert_eq!(err.to_string(), "CreateWindowExW failed (error 0x00000005)");
    }

    #[test]
    fn test_dialog_error_display() {
        let err = AppError::Dialog("font dialog cancelled".to_string());
        assert_eq!(err.to_string(), "Dialog error: font dialog cancelled");
    }
}
