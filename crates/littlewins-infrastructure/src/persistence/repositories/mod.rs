pub mod in_memory_win_repo;
pub mod win_repo;

pub use in_memory_win_repo::InMemoryWinRepository;
pub use win_repo::SqliteWinRepository;
