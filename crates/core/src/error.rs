/// Errors produced by the pure transformations in this crate
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid column URL. Please make sure it includes #column-<column-id>.")]
    InvalidColumnUrl(String),
}
