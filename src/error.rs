//! Error types for ditagen operations.

use thiserror::Error;

/// Errors that can occur while converting document trees to DITA.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML formatting error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The dispatcher met a node kind it has no rendering rule for.
    ///
    /// This is a parser-contract violation, not a data error: the adapter
    /// feeding trees into the converter produced a kind the DITA backend
    /// does not understand.
    #[error("unsupported node kind: {0}")]
    UnsupportedNode(String),

    /// A node is missing an attribute the rendering rule requires,
    /// e.g. an image block without a target path.
    #[error("missing required attribute `{attribute}` on {node} node")]
    MissingAttribute {
        node: &'static str,
        attribute: &'static str,
    },

    /// A document in a batch failed to convert. Carries the input name so
    /// the caller can report which file broke the batch.
    #[error("failed to convert `{name}`: {source}")]
    Document {
        name: String,
        #[source]
        source: Box<Error>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
