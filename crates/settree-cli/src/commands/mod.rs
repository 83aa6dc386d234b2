pub mod block;
pub mod get;
pub mod show;
