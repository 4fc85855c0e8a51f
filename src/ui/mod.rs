pub mod prompt;
pub mod renderer;
pub mod report;
