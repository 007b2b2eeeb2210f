//! Request extractors that report failures in the API error envelope

pub mod json;
pub mod path;

pub use json::JsonBody;
pub use path::IdPath;
