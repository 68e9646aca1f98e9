pub mod inspect;
pub mod reader;
pub mod writer;

/// Faults while reading or writing a `.docx` package. These are real I/O
/// errors; classification itself never fails and reports nothing here.
#[derive(Debug, thiserror::Error)]
pub enum DocxError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("not a valid .docx (zip) package: {0}")]
    Package(#[from] zip::result::ZipError),
    #[error("missing package part: {0}")]
    MissingPart(&'static str),
    #[error("malformed xml in {part}: {source}")]
    Xml {
        part: &'static str,
        #[source]
        source: quick_xml::Error,
    },
}

impl DocxError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        DocxError::Io { path: path.display().to_string(), source }
    }
}
