pub mod result;

pub use result::FunctionAnalysis;
