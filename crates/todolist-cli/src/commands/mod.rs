pub mod add;
pub mod autoclose;
pub mod category;
pub mod delete;
pub mod done;
pub mod edit;
pub mod list;
pub mod stats;
