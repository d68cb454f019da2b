pub mod block;
pub mod completion;
pub mod payload;
pub mod section;
