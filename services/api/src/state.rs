//! Application state shared across handlers

use sqlx::PgPool;
use std::path::PathBuf;

use crate::jwt::JwtService;
use crate::repositories::{
    CategoryRepository, ClaimRepository, DonationRepository, GroupRepository, ItemRepository,
    MessageRepository, UserRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub user_repository: UserRepository,
    pub category_repository: CategoryRepository,
    pub item_repository: ItemRepository,
    pub group_repository: GroupRepository,
    pub message_repository: MessageRepository,
    pub claim_repository: ClaimRepository,
    pub donation_repository: DonationRepository,
    /// Directory holding the built frontend bundle
    pub static_dir: PathBuf,
}

impl AppState {
    /// Build the full state from a pool, a JWT service, and the static dir
    pub fn new(pool: PgPool, jwt_service: JwtService, static_dir: PathBuf) -> Self {
        Self {
            user_repository: UserRepository::new(pool.clone()),
            category_repository: CategoryRepository::new(pool.clone()),
            item_repository: ItemRepository::new(pool.clone()),
            group_repository: GroupRepository::new(pool.clone()),
            message_repository: MessageRepository::new(pool.clone()),
            claim_repository: ClaimRepository::new(pool.clone()),
            donation_repository: DonationRepository::new(pool.clone()),
            db_pool: pool,
            jwt_service,
            static_dir,
        }
    }
}
