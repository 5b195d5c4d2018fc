mod transform;

pub use transform::Transformation;
