//! Sensor drivers.
//!
//! Only the hygrometer feeds the control loop; it produces an
//! [`EnvironmentReading`](crate::app::ports::EnvironmentReading) through the
//! hardware adapter each evaluation.

pub mod humidity;
