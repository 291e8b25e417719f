pub mod extracted;
pub mod normalize;
