//! Supporting utilities used by models.

pub mod constraint;
pub mod hyperbolic;
pub mod stehfest;
pub mod units;
