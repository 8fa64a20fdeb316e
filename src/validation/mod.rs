pub mod harness;
pub mod metrics;
pub mod split;

pub use harness::{
    k_fold_validation, random_subsampling_validation, Classifier, MlpClassifier, PerceptronClassifier,
    ValidationReport,
};
pub use metrics::{accuracy, Accuracy};
pub use split::{k_fold_split, train_test_split};
