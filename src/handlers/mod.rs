//! HTTP handlers, one module per resource.

pub mod category;
pub mod dept;
pub mod flag;
pub mod link;
pub mod price;
pub mod product;
