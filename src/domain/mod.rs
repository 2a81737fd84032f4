//! Domain layer - extraction, price filtering and change detection

pub mod change;
pub mod extraction;
pub mod price;
