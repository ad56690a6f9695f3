pub mod logic;
pub mod workspace;

pub use workspace::{LoadedDataset, Workspace};
