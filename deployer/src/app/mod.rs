//! Command front-end

pub mod annotations;
pub mod options;
pub mod run;
pub mod settings;
