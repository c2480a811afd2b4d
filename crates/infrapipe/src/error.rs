use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Expected a FeatureCollection, found a {0}")]
    NotFeatureCollection(&'static str),

    #[error("Unknown dimension: {0}")]
    UnknownDimension(String),

    #[error("Unknown value '{value}' for dimension '{dimension}'")]
    UnknownValue { dimension: String, value: String },
}

pub type Result<T> = std::result::Result<T, InfraError>;
