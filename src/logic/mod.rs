pub mod catalog;
pub mod discussion;
pub mod editor;
pub mod history;
pub mod session;
pub mod yields;
