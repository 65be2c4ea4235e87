pub mod catalog;
pub mod randomize;
pub mod region;
pub mod settings;
pub mod spoiler_log;
pub mod traverse;
pub mod world;
