//! Storage services: one sqlx operation per controller action, each
//! returning an explicit column projection rather than the full row.

pub mod category;
pub mod dept;
pub mod flag;
pub mod link;
pub mod price;
pub mod product;
