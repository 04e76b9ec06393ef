// Domain layer: source/output models and ports (interfaces). No external dependencies beyond std/serde.

pub mod model;
pub mod ports;
