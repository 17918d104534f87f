pub mod acquire;
pub mod assemble;
pub mod cli;
pub mod config;
pub mod dates;
pub mod extract;
pub mod pipeline;
pub mod profile;
pub mod report;
pub mod sections;
pub mod util;
pub mod validate;
