//! SeaORM 数据库实体

pub mod classes;
pub mod homeworks;
pub mod submissions;
pub mod textbooks;
pub mod users;
