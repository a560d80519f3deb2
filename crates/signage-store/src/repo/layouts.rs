use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};
use signage_core::errors::{ExResult, SignageError};
use signage_core::model::{Layout, LayoutAttributes};
use signage_core::ports::{LayoutFilter, LayoutRepository};

use super::SqliteGateway;
use crate::errors::from_rusqlite;

/// Layout columns plus the id of the layout-specific campaign
const LAYOUT_SELECT: &str = "SELECT l.layoutID, l.userID,
        (SELECT c.campaignID FROM campaign c
           INNER JOIN lkcampaignlayout lk ON lk.campaignID = c.campaignID
          WHERE lk.layoutID = l.layoutID AND c.isLayoutSpecific = 1
          LIMIT 1) AS campaignID,
        l.layout, l.description, l.backgroundImageId, l.backgroundColor,
        l.backgroundzIndex, l.width, l.height, l.status, l.retired,
        l.schemaVersion, l.xml
   FROM layout l";

fn layout_from_row(row: &Row<'_>) -> rusqlite::Result<Layout> {
    let attributes = LayoutAttributes {
        name: row.get(3)?,
        description: row.get(4)?,
        background_image_id: row.get(5)?,
        background_color: row.get(6)?,
        background_z_index: row.get(7)?,
        width: row.get(8)?,
        height: row.get(9)?,
        status: row.get(10)?,
        retired: row.get(11)?,
        schema_version: row.get(12)?,
        legacy_xml: row.get(13)?,
    };
    Ok(Layout::hydrate(row.get(0)?, row.get(1)?, row.get(2)?, attributes))
}

impl LayoutRepository for SqliteGateway<'_> {
    fn get_by_id(&self, layout_id: i64) -> ExResult<Option<Layout>> {
        self.conn
            .query_row(
                &format!("{} WHERE l.layoutID = ?", LAYOUT_SELECT),
                [layout_id],
                layout_from_row,
            )
            .optional()
            .map_err(from_rusqlite)
    }

    fn query(&self, filter: &LayoutFilter) -> ExResult<Vec<Layout>> {
        let mut sql = format!("{} WHERE 1 = 1", LAYOUT_SELECT);
        let mut args: Vec<Value> = Vec::new();

        if let Some(owner_id) = filter.owner_id {
            sql.push_str(" AND l.userID = ?");
            args.push(Value::Integer(owner_id));
        }
        if let Some(name) = &filter.name_exact {
            sql.push_str(" AND l.layout = ?");
            args.push(Value::Text(name.clone()));
        }
        if let Some(name) = &filter.name_like {
            sql.push_str(" AND l.layout LIKE ?");
            args.push(Value::Text(format!("%{}%", name)));
        }
        if let Some(layout_id) = filter.exclude_layout_id {
            sql.push_str(" AND l.layoutID <> ?");
            args.push(Value::Integer(layout_id));
        }
        if let Some(retired) = filter.retired {
            sql.push_str(" AND l.retired = ?");
            args.push(Value::Integer(i64::from(retired)));
        }
        sql.push_str(" ORDER BY l.layout, l.layoutID");

        let mut stmt = self.conn.prepare(&sql).map_err(from_rusqlite)?;
        let layouts = stmt
            .query_map(params_from_iter(args), layout_from_row)
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;
        Ok(layouts)
    }

    fn insert(&self, layout: &Layout, at: DateTime<Utc>) -> ExResult<i64> {
        let attrs = layout.attributes();
        let now = at.to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO layout (layout, description, userID, createdDT, modifiedDT,
                    status, width, height, schemaVersion, backgroundImageId,
                    backgroundColor, backgroundzIndex, retired, xml)
                 VALUES (?1, ?2, ?3, ?4, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    attrs.name,
                    attrs.description,
                    layout.owner_id(),
                    now,
                    attrs.status,
                    attrs.width,
                    attrs.height,
                    attrs.schema_version,
                    attrs.background_image_id,
                    attrs.background_color,
                    attrs.background_z_index,
                    attrs.retired,
                    attrs.legacy_xml,
                ],
            )
            .map_err(from_rusqlite)?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, layout: &Layout, at: DateTime<Utc>) -> ExResult<()> {
        let layout_id = layout
            .layout_id()
            .ok_or(SignageError::MissingLayoutIdentity)?;
        let attrs = layout.attributes();

        let changed = self
            .conn
            .execute(
                "UPDATE layout
                    SET layout = ?1, description = ?2, userID = ?3, modifiedDT = ?4,
                        retired = ?5, width = ?6, height = ?7, backgroundImageId = ?8,
                        backgroundColor = ?9, backgroundzIndex = ?10, xml = NULL
                  WHERE layoutID = ?11",
                params![
                    attrs.name,
                    attrs.description,
                    layout.owner_id(),
                    at.to_rfc3339(),
                    attrs.retired,
                    attrs.width,
                    attrs.height,
                    attrs.background_image_id,
                    attrs.background_color,
                    attrs.background_z_index,
                    layout_id,
                ],
            )
            .map_err(from_rusqlite)?;

        if changed == 0 {
            return Err(SignageError::LayoutNotFound { layout_id }.into());
        }
        Ok(())
    }

    fn delete(&self, layout_id: i64) -> ExResult<()> {
        self.conn
            .execute("DELETE FROM layout WHERE layoutID = ?", [layout_id])
            .map_err(from_rusqlite)?;
        Ok(())
    }
}
