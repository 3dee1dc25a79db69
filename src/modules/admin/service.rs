use sqlx::PgPool;
use taskshelf_core::AppError;
use tracing::{instrument, warn};

use crate::modules::users::service::UserService;

pub const SELF_DELETE_MESSAGE: &str = "Administrators cannot delete their own account.";

pub struct AdminService;

impl AdminService {
    /// Deletes `user_id` on behalf of `admin_id`. The user's todos go with it.
    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, admin_id: i32, user_id: i32) -> Result<i32, AppError> {
        if admin_id == user_id {
            warn!(user.id = %user_id, "Administrator attempted to delete own account");
            return Err(AppError::bad_request(SELF_DELETE_MESSAGE));
        }

        UserService::delete_user(db, user_id).await
    }
}
