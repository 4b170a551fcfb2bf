// Domain layer: core model and ports (interfaces). No external dependencies
// beyond serde_json for the converted value.

pub mod model;
pub mod ports;
