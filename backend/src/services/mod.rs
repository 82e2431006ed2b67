//! Business logic services for the Inventory & Order Management Platform

pub mod alert;
pub mod notification;
pub mod order;
pub mod product;

pub use alert::AlertService;
pub use notification::NotificationService;
pub use order::OrderService;
pub use product::ProductService;
