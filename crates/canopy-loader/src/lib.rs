pub mod errors;
pub mod formats;
pub mod model;
mod registry;

pub use errors::LoadError;
pub use model::{Dataset, Record};
pub use registry::{load_dataset, DatasetReader};

#[cfg(test)]
mod tests;
