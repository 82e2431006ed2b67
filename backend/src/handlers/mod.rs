//! HTTP handlers for the Inventory & Order Management Platform

pub mod alert;
pub mod health;
pub mod notification;
pub mod order;
pub mod product;

pub use alert::*;
pub use health::*;
pub use notification::*;
pub use order::*;
pub use product::*;
