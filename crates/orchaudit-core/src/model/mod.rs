pub mod application;

pub use application::{ApplicationRecord, PortMapping};
