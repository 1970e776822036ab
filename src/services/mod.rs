//! 服务模块

pub mod journal;
pub mod reflection;

pub use journal::{EntrySnapshot, JournalService, JournalServiceImpl, create_journal_service};
pub use reflection::{Reflection, ReflectionService, create_reflection_service};
