use crate::core::descriptors::DescriptorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("input shape mismatch: {structures} SMILES strings but {labels} labels")]
    ShapeMismatch { structures: usize, labels: usize },

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}
