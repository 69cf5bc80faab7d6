// Domain layer: value types and ports. Adapters implement the ports.

pub mod model;
pub mod ports;
