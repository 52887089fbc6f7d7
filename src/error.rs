use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("pane index {index} is out of range (pane count {count})")]
    PaneOutOfRange { index: usize, count: usize },

    #[error("{0}")]
    Collaborator(String),
}

impl ChartError {
    /// Message suitable for direct display next to the triggering control.
    ///
    /// Collaborator messages frequently arrive prefixed with `Error:`; the
    /// prefix is dropped so hosts can show the text verbatim.
    #[must_use]
    pub fn display_message(&self) -> String {
        strip_error_prefix(&self.to_string())
    }
}

pub(crate) fn strip_error_prefix(message: &str) -> String {
    let trimmed = message.trim_start();
    let lower = trimmed.to_ascii_lowercase();
    let stripped = match lower.strip_prefix("error:") {
        Some(_) => trimmed["error:".len()..].trim_start(),
        None => trimmed,
    };
    stripped.to_owned()
}
