mod memory_state;

pub use memory_state::InMemoryState;
