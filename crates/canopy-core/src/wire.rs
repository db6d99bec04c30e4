use canopy_loader::Dataset;

use crate::error::Result;

/// Encodes a dataset as the UTF-8 JSON array-of-objects payload, in
/// row order. An empty dataset encodes as `[]`.
pub fn encode(dataset: &Dataset) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(dataset.records())?)
}
