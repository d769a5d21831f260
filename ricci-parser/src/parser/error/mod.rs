pub mod kind;

pub use ricci_error::Error;
