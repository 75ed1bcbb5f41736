#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unknown scenario {0:?}")]
    UnknownScenario(String),

    #[error("Missing required reference: {0}")]
    MissingReference(&'static str),

    #[error("Config error")]
    Config(#[from] serde_json::Error),

    #[error("IO error")]
    IO(#[from] std::io::Error),
}
