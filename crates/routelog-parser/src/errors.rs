use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("timeline JSON invalid at line {line}, column {column}: {source}")]
    Json {
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl From<serde_json::Error> for ParserError {
    fn from(source: serde_json::Error) -> Self {
        ParserError::Json {
            line: source.line(),
            column: source.column(),
            source,
        }
    }
}
