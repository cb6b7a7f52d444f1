use std::error::Error;

/// The error type used at the outer edges of the toolset, i.e. for reading
/// input and in the `main` of the tools. Library code uses dedicated
/// `thiserror` enums where a caller can act on the error.
pub type SchemaError = Box<dyn Error>;
