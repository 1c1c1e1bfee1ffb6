// Domain layer: menu models, settings and ports. No I/O here.

pub mod model;
pub mod ports;
pub mod settings;
