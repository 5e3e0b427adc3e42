// Domain layer: models and ports (interfaces). No calculation logic lives here.

pub mod model;
pub mod ports;
