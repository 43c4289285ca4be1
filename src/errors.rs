#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("config is malformed: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("config is not valid utf8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("stop word #{0} is empty")]
    EmptyStopWord(usize),

    #[error("io error: {0:?}")]
    IO(#[from] std::io::Error),
}
