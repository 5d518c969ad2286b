//! Group business logic - Handles all group-related operations.
//!
//! Groups are the ordering parties. A group may only take part in the
//! ordering phase once its enclosure (deposit) is paid; that eligibility is
//! exposed here as a predicate and enforced by the calling layer, so the
//! aggregation core never rejects data it is merely asked to sum up.

use crate::{
    entities::{Group, group},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all groups from the database, ordered alphabetically by name.
pub async fn get_all_groups(db: &DatabaseConnection) -> Result<Vec<group::Model>> {
    Group::find()
        .order_by_asc(group::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a specific group by its name, returning None if not found.
pub async fn get_group_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<group::Model>> {
    Group::find()
        .filter(group::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific group by its unique ID.
pub async fn get_group_by_id(
    db: &DatabaseConnection,
    group_id: i64,
) -> Result<Option<group::Model>> {
    Group::find_by_id(group_id).one(db).await.map_err(Into::into)
}

/// Creates a new group with the specified parameters, performing input validation.
///
/// # Errors
/// Returns an error if the group name is empty or the insert fails.
pub async fn create_group(
    db: &DatabaseConnection,
    name: String,
    enclosure: bool,
) -> Result<group::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Group name cannot be empty".to_string(),
        });
    }

    let group = group::ActiveModel {
        name: Set(name.trim().to_string()),
        enclosure: Set(enclosure),
        ..Default::default()
    };
    group.insert(db).await.map_err(Into::into)
}

/// Updates a group's enclosure flag, e.g. once the deposit has been paid.
///
/// # Errors
/// Returns [`Error::GroupNotFound`] if the group does not exist.
pub async fn set_enclosure(
    db: &DatabaseConnection,
    group_id: i64,
    enclosure: bool,
) -> Result<group::Model> {
    let mut group: group::ActiveModel = Group::find_by_id(group_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::GroupNotFound {
            name: group_id.to_string(),
        })?
        .into();

    group.enclosure = Set(enclosure);
    group.update(db).await.map_err(Into::into)
}

/// Deletes a group; its orders are removed with it.
///
/// # Errors
/// Returns [`Error::GroupNotFound`] if the group does not exist.
pub async fn delete_group(db: &DatabaseConnection, group_id: i64) -> Result<()> {
    let result = Group::delete_by_id(group_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::GroupNotFound {
            name: group_id.to_string(),
        });
    }
    Ok(())
}

/// Whether the group is eligible to order food.
#[must_use]
pub const fn can_order(group: &group::Model) -> bool {
    group.enclosure
}
