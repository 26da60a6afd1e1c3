//! Membership resolution: which family a user is acting in.

use shared::User;

use crate::domain::errors::DomainResult;
use crate::storage::traits::UserStorage;

/// The family a user is currently acting in: their explicitly selected
/// active family, falling back to the first family they joined.
pub fn active_family_id(user: &User) -> Option<String> {
    user.active_family_id
        .clone()
        .or_else(|| user.family_ids.first().cloned())
}

/// Look up a user and resolve their active family.
/// Returns None both for unknown users and for users without a family;
/// read operations treat either as an empty view.
pub async fn resolve_active_family(
    users: &dyn UserStorage,
    user_id: &str,
) -> DomainResult<Option<String>> {
    let user = users.get_user(user_id).await?;
    Ok(user.as_ref().and_then(active_family_id))
}
