//! Repository for the `lists` and `list_items` tables.
//!
//! Multi-statement reads run inside a read-only `REPEATABLE READ`
//! transaction so a list, its owner, and its items come from one snapshot.
//! A read racing a delete therefore sees the whole list or nothing.

use std::collections::HashMap;

use rankly_core::pagination::{clamp_limit, DEFAULT_BROWSE_LIMIT, MAX_LIMIT};
use rankly_core::types::{DbId, UserId};
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::list::{CreateList, CreateListItem, List, ListDetail, ListItem, ListWithItems};
use crate::models::user::UserSummary;
use crate::repositories::user_repo::UserRepo;

/// Column list for the `lists` table.
const COLUMNS: &str = "id, owner_id, title, description, category, is_public, created_at, updated_at";

/// Column list for the `list_items` table.
const ITEM_COLUMNS: &str = "id, list_id, name, note, image_url, rank, created_at, updated_at";

/// Items are shown ascending by rank; ties fall back to insertion order.
const ITEM_ORDER: &str = "rank, created_at, id";

/// Result of an ownership-checked delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The list and all of its items were removed.
    Deleted,
    /// The list exists but belongs to someone else. Nothing was removed.
    Unauthorized,
    /// No list with that id exists.
    NotFound,
}

/// Provides the publish, read, and delete operations for ranked lists.
pub struct ListRepo;

impl ListRepo {
    /// Publish a list and its items atomically.
    ///
    /// The list id is generated here. Item ranks are taken from `input`
    /// as-is; [`CreateList::from_submission`] has already made them `1..=N`.
    /// Any failure rolls back the whole transaction.
    pub async fn create(pool: &PgPool, input: &CreateList) -> Result<List, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO lists (id, owner_id, title, description, category, is_public) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let list = sqlx::query_as::<_, List>(&insert_query)
            .bind(Uuid::new_v4())
            .bind(&input.owner_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.is_public)
            .fetch_one(&mut *tx)
            .await?;

        if !input.items.is_empty() {
            Self::insert_items_inner(&mut tx, list.id, &input.items).await?;
        }

        tx.commit().await?;

        tracing::debug!(list_id = %list.id, items = input.items.len(), "List row and items inserted");
        Ok(list)
    }

    /// Find a list by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<List>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lists WHERE id = $1");
        sqlx::query_as::<_, List>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a list with its owner and items (ascending by rank).
    ///
    /// Returns `None` when the id does not resolve.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<ListDetail>, sqlx::Error> {
        let mut tx = begin_snapshot(pool).await?;

        let query = format!("SELECT {COLUMNS} FROM lists WHERE id = $1");
        let Some(list) = sqlx::query_as::<_, List>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let detail = Self::attach_owners_and_items(&mut tx, vec![list])
            .await?
            .into_iter()
            .next();

        tx.commit().await?;
        Ok(detail)
    }

    /// Items of one list, ascending by rank.
    pub async fn list_items(pool: &PgPool, list_id: DbId) -> Result<Vec<ListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM list_items WHERE list_id = $1 ORDER BY {ITEM_ORDER}"
        );
        sqlx::query_as::<_, ListItem>(&query)
            .bind(list_id)
            .fetch_all(pool)
            .await
    }

    /// Most recent public lists with owners and items.
    ///
    /// `limit` is clamped to `1..=100` (default 10). Private lists are
    /// never returned.
    pub async fn list_public(
        pool: &PgPool,
        limit: Option<i64>,
    ) -> Result<Vec<ListDetail>, sqlx::Error> {
        let limit = clamp_limit(limit, DEFAULT_BROWSE_LIMIT, MAX_LIMIT);
        let mut tx = begin_snapshot(pool).await?;

        let query = format!(
            "SELECT {COLUMNS} FROM lists \
             WHERE is_public = true \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1"
        );
        let lists = sqlx::query_as::<_, List>(&query)
            .bind(limit)
            .fetch_all(&mut *tx)
            .await?;

        let result = Self::attach_owners_and_items(&mut tx, lists).await?;
        tx.commit().await?;
        Ok(result)
    }

    /// Every list owned by `owner_id`, most recent first, with items.
    ///
    /// Public and private lists are both included; callers apply a
    /// [`VisibilityFilter`](rankly_core::visibility::VisibilityFilter).
    pub async fn list_owned(
        pool: &PgPool,
        owner_id: &str,
    ) -> Result<Vec<ListWithItems>, sqlx::Error> {
        let mut tx = begin_snapshot(pool).await?;

        let query = format!(
            "SELECT {COLUMNS} FROM lists \
             WHERE owner_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        let lists = sqlx::query_as::<_, List>(&query)
            .bind(owner_id)
            .fetch_all(&mut *tx)
            .await?;

        let ids: Vec<DbId> = lists.iter().map(|l| l.id).collect();
        let mut items = Self::items_by_list_inner(&mut *tx, &ids).await?;
        tx.commit().await?;

        Ok(lists
            .into_iter()
            .map(|list| {
                let items = items.remove(&list.id).unwrap_or_default();
                ListWithItems { list, items }
            })
            .collect())
    }

    /// Delete a list if `requesting_user_id` owns it.
    ///
    /// The delete is one statement; `ON DELETE CASCADE` removes the items in
    /// the same atomic step. When nothing was deleted, an existence check
    /// tells a foreign list apart from a missing one.
    pub async fn delete_owned(
        pool: &PgPool,
        id: DbId,
        requesting_user_id: &str,
    ) -> Result<DeleteOutcome, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(requesting_user_id)
            .execute(pool)
            .await?;
        if result.rows_affected() > 0 {
            return Ok(DeleteOutcome::Deleted);
        }

        let exists = Self::find_by_id(pool, id).await?.is_some();
        Ok(if exists {
            DeleteOutcome::Unauthorized
        } else {
            DeleteOutcome::NotFound
        })
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Insert all items of a new list with a single `UNNEST` statement.
    async fn insert_items_inner(
        tx: &mut Transaction<'_, Postgres>,
        list_id: DbId,
        items: &[CreateListItem],
    ) -> Result<(), sqlx::Error> {
        let ids: Vec<Uuid> = items.iter().map(|_| Uuid::new_v4()).collect();
        let names: Vec<String> = items.iter().map(|i| i.name.clone()).collect();
        let notes: Vec<Option<String>> = items.iter().map(|i| i.note.clone()).collect();
        let image_urls: Vec<Option<String>> = items.iter().map(|i| i.image_url.clone()).collect();
        let ranks: Vec<i32> = items.iter().map(|i| i.rank).collect();

        sqlx::query(
            "INSERT INTO list_items (id, list_id, name, note, image_url, rank) \
             SELECT u.id, $1, u.name, u.note, u.image_url, u.rank \
             FROM UNNEST($2::uuid[], $3::text[], $4::text[], $5::text[], $6::int4[]) \
                AS u(id, name, note, image_url, rank)",
        )
        .bind(list_id)
        .bind(&ids)
        .bind(&names)
        .bind(&notes)
        .bind(&image_urls)
        .bind(&ranks)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Items for several lists, grouped by list id, each group ascending by rank.
    async fn items_by_list_inner(
        conn: &mut PgConnection,
        list_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<ListItem>>, sqlx::Error> {
        if list_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM list_items \
             WHERE list_id = ANY($1) \
             ORDER BY list_id, {ITEM_ORDER}"
        );
        let rows = sqlx::query_as::<_, ListItem>(&query)
            .bind(list_ids)
            .fetch_all(&mut *conn)
            .await?;

        let mut grouped: HashMap<DbId, Vec<ListItem>> = HashMap::new();
        for item in rows {
            grouped.entry(item.list_id).or_default().push(item);
        }
        Ok(grouped)
    }

    /// Attach owner summaries and items, preserving the order of `lists`.
    async fn attach_owners_and_items(
        tx: &mut Transaction<'_, Postgres>,
        lists: Vec<List>,
    ) -> Result<Vec<ListDetail>, sqlx::Error> {
        if lists.is_empty() {
            return Ok(Vec::new());
        }

        let list_ids: Vec<DbId> = lists.iter().map(|l| l.id).collect();
        let mut owner_ids: Vec<UserId> = lists.iter().map(|l| l.owner_id.clone()).collect();
        owner_ids.sort();
        owner_ids.dedup();

        let owners: HashMap<UserId, UserSummary> = UserRepo::find_summaries(&mut **tx, &owner_ids)
            .await?
            .into_iter()
            .map(|owner| (owner.id.clone(), owner))
            .collect();
        let mut items = Self::items_by_list_inner(&mut **tx, &list_ids).await?;

        // owner_id is a cascading foreign key, so inside one snapshot every
        // list has its owner.
        Ok(lists
            .into_iter()
            .filter_map(|list| {
                let owner = owners.get(&list.owner_id)?.clone();
                let items = items.remove(&list.id).unwrap_or_default();
                Some(ListDetail { list, owner, items })
            })
            .collect())
    }
}

/// Start a read-only transaction that sees one consistent snapshot.
async fn begin_snapshot(pool: &PgPool) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}
