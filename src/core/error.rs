use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{item} has no {capability} data")]
    MissingCapability {
        item: String,
        capability: &'static str,
    },

    #[error("range {range} hexes exceeds tabulated ballistic data (max {max})")]
    RangeBeyondTable { range: u32, max: u32 },

    #[error("{table} queried outside its domain: {detail}")]
    TableDomain {
        table: &'static str,
        detail: String,
    },

    #[error("mismatched parallel inputs: {targets} targets but {actual} {what}")]
    MismatchedInputs {
        targets: usize,
        actual: usize,
        what: &'static str,
    },

    #[error("equipment item not found: {0:?}")]
    ItemNotFound(crate::model::equipment::ItemId),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
