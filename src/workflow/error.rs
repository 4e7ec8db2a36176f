use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// The browser refused to open the secondary window.
    #[error("Popups are blocked")]
    PopupBlocked,
    /// A call to the Huddle API failed.
    #[error("Request failed: {0}")]
    Request(String),
}
