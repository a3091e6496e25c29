//! Repositories for database operations
//!
//! Each repository is a cheap `Clone` over the shared `PgPool`; handlers
//! receive them through `AppState` rather than any module-wide singleton.

pub mod category;
pub mod claim;
pub mod donation;
pub mod group;
pub mod item;
pub mod message;
pub mod user;

pub use category::CategoryRepository;
pub use claim::ClaimRepository;
pub use donation::DonationRepository;
pub use group::GroupRepository;
pub use item::ItemRepository;
pub use message::MessageRepository;
pub use user::UserRepository;
