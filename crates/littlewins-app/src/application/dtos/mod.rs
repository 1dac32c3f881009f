mod streak_dto;
mod win_dto;

pub use streak_dto::StreakDto;
pub use win_dto::WinDto;
