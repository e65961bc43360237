pub mod function_analyzer;
pub mod program_analyzer;
pub mod validation;

pub use function_analyzer::FunctionAnalyzer;
pub use program_analyzer::{ProgramAnalysis, ProgramAnalyzer};
pub use validation::validate_graph;
