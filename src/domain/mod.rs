// Domain layer: value types, response schemas and the transport port.

pub mod model;
pub mod ports;
pub mod responses;
