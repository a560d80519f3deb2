use rusqlite::{params, Connection, Row};
use signage_core::errors::ExResult;
use signage_core::model::{Playlist, Region, Widget};
use signage_core::ports::RegionRepository;

use super::{delete_missing, SqliteGateway};
use crate::errors::{from_rusqlite, Result};

fn region_from_row(row: &Row<'_>) -> rusqlite::Result<Region> {
    Ok(Region {
        region_id: row.get(0)?,
        layout_id: row.get(1)?,
        owner_id: row.get(2)?,
        name: row.get(3)?,
        width: row.get(4)?,
        height: row.get(5)?,
        top: row.get(6)?,
        left: row.get(7)?,
        z_index: row.get(8)?,
        duration: row.get(9)?,
        playlists: Vec::new(),
        playlists_loaded: false,
    })
}

fn playlists_for(conn: &Connection, region_id: i64) -> Result<Vec<Playlist>> {
    let mut stmt = conn
        .prepare(
            "SELECT playlistId, regionId, ownerId, name, displayOrder
               FROM playlist WHERE regionId = ?
              ORDER BY displayOrder, playlistId",
        )
        .map_err(from_rusqlite)?;
    let mut playlists = stmt
        .query_map([region_id], |row| {
            Ok(Playlist {
                playlist_id: row.get(0)?,
                region_id: row.get(1)?,
                owner_id: row.get(2)?,
                name: row.get(3)?,
                display_order: row.get(4)?,
                widgets: Vec::new(),
            })
        })
        .map_err(from_rusqlite)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(from_rusqlite)?;

    let mut widget_stmt = conn
        .prepare(
            "SELECT widgetId, playlistId, ownerId, type, duration, displayOrder
               FROM widget WHERE playlistId = ?
              ORDER BY displayOrder, widgetId",
        )
        .map_err(from_rusqlite)?;
    for playlist in &mut playlists {
        let Some(playlist_id) = playlist.playlist_id else {
            continue;
        };
        playlist.widgets = widget_stmt
            .query_map([playlist_id], |row| {
                Ok(Widget {
                    widget_id: row.get(0)?,
                    playlist_id: row.get(1)?,
                    owner_id: row.get(2)?,
                    widget_type: row.get(3)?,
                    duration: row.get(4)?,
                    display_order: row.get(5)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;
    }

    Ok(playlists)
}

fn save_playlists(conn: &Connection, region_id: i64, playlists: &mut [Playlist]) -> Result<()> {
    let keep: Vec<i64> = playlists.iter().filter_map(|p| p.playlist_id).collect();
    delete_missing(conn, "playlist", "playlistId", "regionId", region_id, &keep)?;

    for playlist in playlists {
        playlist.region_id = Some(region_id);
        let playlist_id = match playlist.playlist_id {
            Some(id) => {
                conn.execute(
                    "UPDATE playlist SET regionId = ?1, ownerId = ?2, name = ?3, displayOrder = ?4
                      WHERE playlistId = ?5",
                    params![region_id, playlist.owner_id, playlist.name, playlist.display_order, id],
                )
                .map_err(from_rusqlite)?;
                id
            }
            None => {
                conn.execute(
                    "INSERT INTO playlist (regionId, ownerId, name, displayOrder) VALUES (?1, ?2, ?3, ?4)",
                    params![region_id, playlist.owner_id, playlist.name, playlist.display_order],
                )
                .map_err(from_rusqlite)?;
                let id = conn.last_insert_rowid();
                playlist.playlist_id = Some(id);
                id
            }
        };

        save_widgets(conn, playlist_id, &mut playlist.widgets)?;
    }

    Ok(())
}

fn save_widgets(conn: &Connection, playlist_id: i64, widgets: &mut [Widget]) -> Result<()> {
    let keep: Vec<i64> = widgets.iter().filter_map(|w| w.widget_id).collect();
    delete_missing(conn, "widget", "widgetId", "playlistId", playlist_id, &keep)?;

    for widget in widgets {
        widget.playlist_id = Some(playlist_id);
        match widget.widget_id {
            Some(id) => {
                conn.execute(
                    "UPDATE widget SET playlistId = ?1, ownerId = ?2, type = ?3, duration = ?4,
                            displayOrder = ?5
                      WHERE widgetId = ?6",
                    params![
                        playlist_id,
                        widget.owner_id,
                        widget.widget_type,
                        widget.duration,
                        widget.display_order,
                        id
                    ],
                )
                .map_err(from_rusqlite)?;
            }
            None => {
                conn.execute(
                    "INSERT INTO widget (playlistId, ownerId, type, duration, displayOrder)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        playlist_id,
                        widget.owner_id,
                        widget.widget_type,
                        widget.duration,
                        widget.display_order
                    ],
                )
                .map_err(from_rusqlite)?;
                widget.widget_id = Some(conn.last_insert_rowid());
            }
        }
    }

    Ok(())
}

impl RegionRepository for SqliteGateway<'_> {
    fn get_by_layout_id(&self, layout_id: i64) -> ExResult<Vec<Region>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT regionId, layoutId, ownerId, name, width, height, \"top\", \"left\",
                        zIndex, duration
                   FROM region WHERE layoutId = ?
                  ORDER BY regionId",
            )
            .map_err(from_rusqlite)?;
        let regions = stmt
            .query_map([layout_id], region_from_row)
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;
        Ok(regions)
    }

    fn load_playlists(&self, region: &mut Region) -> ExResult<()> {
        if let Some(region_id) = region.region_id {
            region.playlists = playlists_for(self.conn, region_id)?;
        }
        region.playlists_loaded = true;
        Ok(())
    }

    /// Playlists are only synchronised when they were loaded
    fn save(&self, region: &mut Region) -> ExResult<()> {
        let region_id = match region.region_id {
            Some(id) => {
                self.conn
                    .execute(
                        "UPDATE region
                            SET layoutId = ?1, ownerId = ?2, name = ?3, width = ?4, height = ?5,
                                \"top\" = ?6, \"left\" = ?7, zIndex = ?8, duration = ?9
                          WHERE regionId = ?10",
                        params![
                            region.layout_id,
                            region.owner_id,
                            region.name,
                            region.width,
                            region.height,
                            region.top,
                            region.left,
                            region.z_index,
                            region.duration,
                            id
                        ],
                    )
                    .map_err(from_rusqlite)?;
                id
            }
            None => {
                self.conn
                    .execute(
                        "INSERT INTO region (layoutId, ownerId, name, width, height, \"top\",
                            \"left\", zIndex, duration)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                        params![
                            region.layout_id,
                            region.owner_id,
                            region.name,
                            region.width,
                            region.height,
                            region.top,
                            region.left,
                            region.z_index,
                            region.duration
                        ],
                    )
                    .map_err(from_rusqlite)?;
                let id = self.conn.last_insert_rowid();
                region.region_id = Some(id);
                id
            }
        };

        if region.playlists_loaded {
            save_playlists(self.conn, region_id, &mut region.playlists)?;
        }
        Ok(())
    }

    fn delete(&self, region: &Region) -> ExResult<()> {
        let Some(region_id) = region.region_id else {
            return Ok(());
        };

        self.conn
            .execute(
                "DELETE FROM widget WHERE playlistId IN
                    (SELECT playlistId FROM playlist WHERE regionId = ?)",
                [region_id],
            )
            .map_err(from_rusqlite)?;
        self.conn
            .execute("DELETE FROM playlist WHERE regionId = ?", [region_id])
            .map_err(from_rusqlite)?;
        self.conn
            .execute("DELETE FROM region WHERE regionId = ?", [region_id])
            .map_err(from_rusqlite)?;
        Ok(())
    }
}
