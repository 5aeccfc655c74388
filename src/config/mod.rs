pub mod lang;
pub mod prompt;
