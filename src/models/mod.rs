//! Data models for the countdown server

pub mod countdown;
pub mod schedule;
pub mod shop;

// Re-export commonly used types
pub use countdown::{CountdownConfig, CountdownMode, StoredCountdown};
pub use schedule::{ActiveDay, HoursRange, TimeOfDay, WeekSchedule, Weekday};
pub use shop::{SessionClaims, Shop};
