pub mod place;
pub mod scale_index;
