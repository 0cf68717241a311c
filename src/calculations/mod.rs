pub mod delay;
pub mod rollup;
