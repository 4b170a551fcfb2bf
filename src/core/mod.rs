pub mod convert;
pub mod pipeline;
pub mod xml;

pub use crate::domain::model::TransformResult;
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
