use thiserror::Error;

/// Whole-dataset failure. No partial dataset is ever exposed after one of these.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset from {origin}: {reason}")]
    Read { origin: String, reason: String },
    #[error("dataset document from {origin} is not valid JSON")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("record #{position} rejected under strict policy")]
    Strict {
        position: usize,
        #[source]
        source: RecordParseError,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Why a single record was refused at load time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordParseError {
    #[error("record is malformed: {reason}")]
    Malformed { reason: String },
    #[error("record has no id")]
    MissingId,
    #[error("record {id} repeats an id already loaded")]
    DuplicateId { id: String },
    #[error("record {id} has unparseable date `{raw}`")]
    InvalidTimestamp { id: String, raw: String },
    #[error("record {id} has unknown severity `{raw}`")]
    InvalidSeverity { id: String, raw: String },
    #[error("record {id} has negative casualty count")]
    NegativeCasualties { id: String },
    #[error("record {id} has out-of-range coordinates ({lat}, {lng})")]
    InvalidCoordinates { id: String, lat: String, lng: String },
}
