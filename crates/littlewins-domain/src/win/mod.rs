mod collection;
mod record;
mod repository;


pub use collection::WinCollection;
pub use record::{validate_win_text, WinRecord};
pub use repository::WinRepository;
