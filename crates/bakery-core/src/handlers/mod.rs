//! Workflow handlers for the actions the pages drive.
//!
//! Each handler wraps the order state machine for one area of the shop,
//! publishing events on the bus so the engine loop and any other
//! listeners can observe what happened.

pub mod delivery;
pub mod intake;
pub mod kitchen;

pub use delivery::DeliveryHandler;
pub use intake::IntakeHandler;
pub use kitchen::KitchenHandler;
