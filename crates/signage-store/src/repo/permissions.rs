use rusqlite::params;
use signage_core::errors::ExResult;
use signage_core::model::Permission;
use signage_core::ports::PermissionRepository;

use super::SqliteGateway;
use crate::errors::from_rusqlite;

impl PermissionRepository for SqliteGateway<'_> {
    fn get_by_object_id(&self, entity: &str, object_id: i64) -> ExResult<Vec<Permission>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT permissionId, entity, objectId, groupId, canView, canEdit, canDelete
                   FROM permission WHERE entity = ?1 AND objectId = ?2
                  ORDER BY groupId",
            )
            .map_err(from_rusqlite)?;
        let permissions = stmt
            .query_map(params![entity, object_id], |row| {
                Ok(Permission {
                    permission_id: row.get(0)?,
                    entity: row.get(1)?,
                    object_id: row.get(2)?,
                    group_id: row.get(3)?,
                    view: row.get(4)?,
                    edit: row.get(5)?,
                    delete: row.get(6)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;
        Ok(permissions)
    }

    /// Upsert on (entity, object, group)
    fn save(&self, permission: &mut Permission) -> ExResult<()> {
        self.conn
            .execute(
                "INSERT INTO permission (entity, objectId, groupId, canView, canEdit, canDelete)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT (entity, objectId, groupId) DO UPDATE SET
                    canView = excluded.canView,
                    canEdit = excluded.canEdit,
                    canDelete = excluded.canDelete",
                params![
                    permission.entity,
                    permission.object_id,
                    permission.group_id,
                    permission.view,
                    permission.edit,
                    permission.delete
                ],
            )
            .map_err(from_rusqlite)?;

        let permission_id = self
            .conn
            .query_row(
                "SELECT permissionId FROM permission
                  WHERE entity = ?1 AND objectId = ?2 AND groupId = ?3",
                params![permission.entity, permission.object_id, permission.group_id],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;
        permission.permission_id = Some(permission_id);
        Ok(())
    }

    fn delete_all(&self, entity: &str, object_id: i64) -> ExResult<()> {
        self.conn
            .execute(
                "DELETE FROM permission WHERE entity = ?1 AND objectId = ?2",
                params![entity, object_id],
            )
            .map_err(from_rusqlite)?;
        Ok(())
    }
}
