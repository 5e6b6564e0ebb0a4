// Ports - boundaries between the host application and this crate

pub mod provided;
pub mod required;

pub use provided::*;
pub use required::*;
