// Common utilities

pub mod dot_string;
pub mod dot_map_accessor;
pub mod log_format;

pub use dot_string::DotString;
pub use dot_map_accessor::DotMapAccessor;
pub use log_format::LogFormat;
