// Feature engineering: (StudentProfile, Role) -> fixed 13-feature vector.
// The ordering in FEATURE_NAMES is the ordering the classifier trains on.

pub mod extractor;

pub use extractor::{extract_features, FeatureVector, FEATURE_NAMES, NUM_FEATURES};
