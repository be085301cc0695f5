mod api;
mod pages;

pub use api::*;
pub use pages::*;
