mod product;

pub use product::{Product, SAMPLE_DESCRIPTION, SAMPLE_NAME};
