/// Errors from loading a profile catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(String),

    #[error("profile '{id}' has unknown standard '{value}'")]
    UnknownStandard { id: String, value: String },

    #[error("duplicate profile id '{0}'")]
    DuplicateId(String),
}
