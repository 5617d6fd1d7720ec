pub mod contrast;
pub mod info;
pub mod render;
