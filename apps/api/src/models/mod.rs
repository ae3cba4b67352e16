pub mod lenient;
pub mod profile;
pub mod resume;
pub mod wire;
