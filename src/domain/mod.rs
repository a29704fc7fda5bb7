// Domain layer: form model and ports (interfaces) to the page, storage and network.

pub mod model;
pub mod ports;
