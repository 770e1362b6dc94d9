mod batch;
mod featurizer;

pub use batch::build_batch_options;
pub use featurizer::{build_featurizer, load_catalog};
