/// Draft editing and normalization error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Image, title or quantity missing at submit time.
    MissingRequired,
    UnknownField(String),
    InvalidTradeType(String),
}

impl std::fmt::Display for DraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired => {
                write!(f, "Please fill all required fields and upload an image.")
            }
            Self::UnknownField(name) => write!(f, "unknown form field: {name}"),
            Self::InvalidTradeType(value) => write!(f, "invalid trade type: {value}"),
        }
    }
}

impl std::error::Error for DraftError {}
