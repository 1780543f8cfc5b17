pub mod allocator;
pub mod run;
