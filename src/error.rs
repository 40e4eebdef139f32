use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptBoxError {
    #[error("Unknown format '{0}' (expected xml, json or markdown)")]
    UnknownFormat(String),

    #[error("Missing value for required template variable '{0}'")]
    MissingVariable(String),

    #[error("Invalid variable assignment '{0}' (expected name=value)")]
    InvalidAssignment(String),

    #[error("At least {0} variations are required")]
    TooFewVariations(usize),

    #[error("No variation at index {0}")]
    NoSuchVariation(usize),

    #[error("Please enter a test input")]
    BlankTestInput,

    #[error("Please fill in both title and content")]
    IncompletePrompt,

    #[error("Prompt content cannot be empty")]
    BlankContent,

    #[error("Please add a note about what changed")]
    MissingNote,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Backend returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to reach PromptBox backend: {0}")]
    Transport(#[from] reqwest::Error),
}
