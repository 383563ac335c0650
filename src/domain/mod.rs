//! Domain values and the ports the application layer drives.

pub mod money;
pub mod payment;
pub mod ports;
pub mod session;
pub mod shopper;
