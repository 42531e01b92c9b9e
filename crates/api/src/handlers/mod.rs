pub mod lists;
pub mod pages;
