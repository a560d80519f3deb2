use rusqlite::{params, OptionalExtension};
use signage_core::errors::ExResult;
use signage_core::model::Tag;
use signage_core::ports::TagRepository;

use super::SqliteGateway;
use crate::errors::{from_rusqlite, Result};

impl SqliteGateway<'_> {
    fn tag_layout_ids(&self, tag_id: i64) -> Result<Vec<i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT layoutId FROM lktaglayout WHERE tagId = ? ORDER BY layoutId")
            .map_err(from_rusqlite)?;
        let ids = stmt
            .query_map([tag_id], |row| row.get(0))
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<i64>>>()
            .map_err(from_rusqlite)?;
        Ok(ids)
    }
}

impl TagRepository for SqliteGateway<'_> {
    fn load_by_layout_id(&self, layout_id: i64) -> ExResult<Vec<Tag>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT t.tagId, t.tag FROM tag t
                  INNER JOIN lktaglayout lk ON lk.tagId = t.tagId
                  WHERE lk.layoutId = ?
                  ORDER BY t.tag",
            )
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([layout_id], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;

        let mut tags = Vec::with_capacity(rows.len());
        for (tag_id, name) in rows {
            let mut tag = Tag::new(name);
            tag.tag_id = Some(tag_id);
            tag.layout_ids = self.tag_layout_ids(tag_id)?.into_iter().collect();
            tags.push(tag);
        }
        Ok(tags)
    }

    /// Tags are unique by name; an unsaved tag reuses an existing row
    ///
    /// Only pending assignments and unassignments are written.
    fn save(&self, tag: &mut Tag) -> ExResult<()> {
        let tag_id = match tag.tag_id {
            Some(id) => id,
            None => {
                let existing: Option<i64> = self
                    .conn
                    .query_row("SELECT tagId FROM tag WHERE tag = ?", [&tag.tag], |row| {
                        row.get(0)
                    })
                    .optional()
                    .map_err(from_rusqlite)?;
                match existing {
                    Some(id) => id,
                    None => {
                        self.conn
                            .execute("INSERT INTO tag (tag) VALUES (?)", [&tag.tag])
                            .map_err(from_rusqlite)?;
                        self.conn.last_insert_rowid()
                    }
                }
            }
        };
        tag.tag_id = Some(tag_id);

        for layout_id in &tag.assigned_layout_ids {
            self.conn
                .execute(
                    "INSERT OR IGNORE INTO lktaglayout (tagId, layoutId) VALUES (?1, ?2)",
                    params![tag_id, layout_id],
                )
                .map_err(from_rusqlite)?;
        }
        for layout_id in &tag.unassigned_layout_ids {
            self.conn
                .execute(
                    "DELETE FROM lktaglayout WHERE tagId = ?1 AND layoutId = ?2",
                    params![tag_id, layout_id],
                )
                .map_err(from_rusqlite)?;
        }
        tag.clear_pending();
        Ok(())
    }
}
