pub mod encoding;
pub mod loader;
pub mod merge;
pub mod pairs;
pub mod pipeline;
pub mod writer;
