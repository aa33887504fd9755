//! Domain layer: the payment record and the ports the application drives.

pub mod payment;
pub mod ports;
