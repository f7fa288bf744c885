pub mod advice_resolver;
pub mod feature_extractor;

pub use advice_resolver::{
    ActionLabel, AdviceAction, AdviceResolver, UnknownAdviceLabel, UNKNOWN_ADVICE,
};
pub use feature_extractor::FeatureExtractor;
