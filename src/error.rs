//! Process-level error type.
//!
//! Exit codes are part of the CLI contract and stable per failure stage:
//!
//! - 2: input file missing/unreadable or required columns absent
//! - 3: no usable rows after ingest
//! - 4: chart render or spreadsheet export failure
//! - 5: report document serialization/write failure
//!
//! Viewer-launch failures are recovered locally and never become an `AppError`.

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Input file or schema problem (`DataLoadError`).
    pub fn data_load(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// Dataset is empty after row-level validation.
    pub fn empty_dataset(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    /// Chart render or spreadsheet export failure (`RenderError`/`ExportError`).
    pub fn export(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    /// Report document write failure (`DocumentWriteError`).
    pub fn document(message: impl Into<String>) -> Self {
        Self::new(5, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
