pub mod file;
pub mod memory;

pub use file::FileAudioStorage;
pub use memory::MemoryAudioStorage;
