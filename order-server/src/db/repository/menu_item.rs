//! Menu Item Repository

use shared::models::{
    ImageType, MenuItem, MenuItemCreate, MenuItemImage, MenuItemImageUpsert, MenuItemSummary,
    MenuItemUpdate,
};
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqliteExecutor};

use super::RepoResult;

const COLUMNS: &str = "id, store_id, category_id, name, description, price, image_path, \
                       image_thumbnail_path, max_quantity_per_order, display_order, \
                       is_available, is_active, created_at, updated_at";

const IMAGE_COLUMNS: &str = "id, menu_item_id, image_type, file_path, file_size, width, height, \
                             mime_type, uploaded_at, created_at, updated_at";

/// Listing filters; inactive items are never listed
#[derive(Debug, Default, Clone, Copy)]
pub struct MenuFilter {
    pub store_id: Option<i64>,
    pub category_id: Option<i64>,
    pub available_only: bool,
}

pub async fn find_summaries(
    db: impl SqliteExecutor<'_>,
    filter: MenuFilter,
) -> RepoResult<Vec<MenuItemSummary>> {
    let rows = sqlx::query_as(
        r#"
        SELECT m.id, m.name, m.description, m.price, m.category_id,
               c.name AS category_name,
               COALESCE(
                   (SELECT i.file_path FROM menu_item_images i
                    WHERE i.menu_item_id = m.id AND i.image_type = 'thumbnail'),
                   m.image_thumbnail_path
               ) AS thumbnail_url,
               m.is_available, m.is_active, m.max_quantity_per_order
        FROM menu_items m
        LEFT JOIN categories c ON c.id = m.category_id
        WHERE m.is_active = 1
          AND (?1 IS NULL OR m.store_id = ?1)
          AND (?2 IS NULL OR m.category_id = ?2)
          AND (?3 = 0 OR m.is_available = 1)
        ORDER BY c.display_order, m.display_order, m.id
        "#,
    )
    .bind(filter.store_id)
    .bind(filter.category_id)
    .bind(filter.available_only)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(db: impl SqliteExecutor<'_>, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("SELECT {COLUMNS} FROM menu_items WHERE id = ?");
    Ok(sqlx::query_as(&sql).bind(id).fetch_optional(db).await?)
}

/// Fetch every item of a cart in one round trip; missing ids are simply absent
pub async fn find_by_ids(conn: &mut SqliteConnection, ids: &[i64]) -> RepoResult<Vec<MenuItem>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!("SELECT {COLUMNS} FROM menu_items WHERE id IN ({placeholders})");
    let mut query = sqlx::query_as(&sql);
    for id in ids {
        query = query.bind(id);
    }
    Ok(query.fetch_all(&mut *conn).await?)
}

pub async fn category_name(
    db: impl SqliteExecutor<'_>,
    category_id: Option<i64>,
) -> RepoResult<Option<String>> {
    let Some(category_id) = category_id else {
        return Ok(None);
    };
    Ok(sqlx::query_scalar("SELECT name FROM categories WHERE id = ?")
        .bind(category_id)
        .fetch_optional(db)
        .await?)
}

pub async fn find_images(
    db: impl SqliteExecutor<'_>,
    menu_item_id: i64,
) -> RepoResult<Vec<MenuItemImage>> {
    let sql = format!(
        "SELECT {IMAGE_COLUMNS} FROM menu_item_images WHERE menu_item_id = ? ORDER BY image_type"
    );
    Ok(sqlx::query_as(&sql)
        .bind(menu_item_id)
        .fetch_all(db)
        .await?)
}

pub async fn create(db: impl SqliteExecutor<'_>, data: &MenuItemCreate) -> RepoResult<MenuItem> {
    let now = now_millis();
    let sql = format!(
        "INSERT INTO menu_items \
         (store_id, category_id, name, description, price, image_path, image_thumbnail_path, \
          max_quantity_per_order, display_order, is_available, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 1, 1, ?, ?) RETURNING {COLUMNS}"
    );
    Ok(sqlx::query_as(&sql)
        .bind(data.store_id)
        .bind(data.category_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(&data.image_path)
        .bind(&data.image_thumbnail_path)
        .bind(data.max_quantity_per_order)
        .bind(data.display_order.unwrap_or(0))
        .bind(now)
        .bind(now)
        .fetch_one(db)
        .await?)
}

pub async fn update(
    db: impl SqliteExecutor<'_>,
    id: i64,
    data: &MenuItemUpdate,
) -> RepoResult<Option<MenuItem>> {
    let sql = format!(
        r#"
        UPDATE menu_items SET
            category_id = COALESCE(?, category_id),
            name = COALESCE(?, name),
            description = COALESCE(?, description),
            price = COALESCE(?, price),
            image_path = COALESCE(?, image_path),
            image_thumbnail_path = COALESCE(?, image_thumbnail_path),
            max_quantity_per_order = COALESCE(?, max_quantity_per_order),
            display_order = COALESCE(?, display_order),
            is_available = COALESCE(?, is_available),
            is_active = COALESCE(?, is_active),
            updated_at = ?
        WHERE id = ?
        RETURNING {COLUMNS}
        "#
    );
    Ok(sqlx::query_as(&sql)
        .bind(data.category_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(&data.image_path)
        .bind(&data.image_thumbnail_path)
        .bind(data.max_quantity_per_order)
        .bind(data.display_order)
        .bind(data.is_available)
        .bind(data.is_active)
        .bind(now_millis())
        .bind(id)
        .fetch_optional(db)
        .await?)
}

/// Flip the sold-out switch
pub async fn toggle_availability(
    db: impl SqliteExecutor<'_>,
    id: i64,
) -> RepoResult<Option<MenuItem>> {
    let sql = format!(
        "UPDATE menu_items SET is_available = NOT is_available, updated_at = ? \
         WHERE id = ? RETURNING {COLUMNS}"
    );
    Ok(sqlx::query_as(&sql)
        .bind(now_millis())
        .bind(id)
        .fetch_optional(db)
        .await?)
}

/// Insert or replace the image of one type for a menu item
pub async fn upsert_image(
    db: impl SqliteExecutor<'_>,
    menu_item_id: i64,
    image_type: ImageType,
    data: &MenuItemImageUpsert,
) -> RepoResult<MenuItemImage> {
    let now = now_millis();
    let sql = format!(
        r#"
        INSERT INTO menu_item_images
            (menu_item_id, image_type, file_path, file_size, width, height, mime_type,
             uploaded_at, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8, ?8)
        ON CONFLICT (menu_item_id, image_type) DO UPDATE SET
            file_path = excluded.file_path,
            file_size = excluded.file_size,
            width = excluded.width,
            height = excluded.height,
            mime_type = excluded.mime_type,
            uploaded_at = excluded.uploaded_at,
            updated_at = excluded.updated_at
        RETURNING {IMAGE_COLUMNS}
        "#
    );
    Ok(sqlx::query_as(&sql)
        .bind(menu_item_id)
        .bind(image_type)
        .bind(&data.file_path)
        .bind(data.file_size)
        .bind(data.width)
        .bind(data.height)
        .bind(&data.mime_type)
        .bind(now)
        .fetch_one(db)
        .await?)
}
