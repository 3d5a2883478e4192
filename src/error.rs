use thiserror::Error;

#[derive(Error, Debug)]
pub enum XdoError {
    #[error("could not open X11 display {display:?} (is an X server running?)")]
    OpenDisplay { display: Option<String> },

    #[error("{call} failed with status {status}")]
    Call { call: &'static str, status: i32 },

    #[error("string contains an interior NUL byte: {0}")]
    Nul(#[from] std::ffi::NulError),
}

pub type Result<T> = std::result::Result<T, XdoError>;
