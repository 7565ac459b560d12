pub mod consumer;
pub mod entity;
pub mod feature;
pub mod model;

pub use consumer::Consumer;
pub use entity::{Entity, EntityProperty};
pub use feature::{AdHocSpec, BatchSpec, Feature, FeatureAccess};
pub use model::ApiModel;
