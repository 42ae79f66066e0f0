pub mod check;
pub mod fold;
