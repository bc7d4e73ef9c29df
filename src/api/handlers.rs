pub mod layout;
pub mod plants;
pub mod posts;
pub mod yields;
