use rusqlite::{params, OptionalExtension, Row};
use signage_core::errors::ExResult;
use signage_core::model::{Campaign, CAMPAIGN_ENTITY};
use signage_core::ports::CampaignRepository;

use super::SqliteGateway;
use crate::errors::{from_rusqlite, Result};

fn campaign_from_row(row: &Row<'_>) -> rusqlite::Result<Campaign> {
    Ok(Campaign {
        campaign_id: row.get(0)?,
        campaign: row.get(1)?,
        owner_id: row.get(2)?,
        is_layout_specific: row.get(3)?,
        layout_ids: Vec::new(),
        assigned_layout_ids: Vec::new(),
        unassigned_layout_ids: Vec::new(),
    })
}

impl SqliteGateway<'_> {
    fn with_layout_ids(&self, mut campaign: Campaign) -> Result<Campaign> {
        let Some(campaign_id) = campaign.campaign_id else {
            return Ok(campaign);
        };
        let mut stmt = self
            .conn
            .prepare(
                "SELECT layoutID FROM lkcampaignlayout WHERE campaignID = ?
                  ORDER BY displayOrder, lkCampaignLayoutID",
            )
            .map_err(from_rusqlite)?;
        campaign.layout_ids = stmt
            .query_map([campaign_id], |row| row.get(0))
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<i64>>>()
            .map_err(from_rusqlite)?;
        Ok(campaign)
    }
}

impl CampaignRepository for SqliteGateway<'_> {
    fn get_by_id(&self, campaign_id: i64) -> ExResult<Option<Campaign>> {
        let campaign = self
            .conn
            .query_row(
                "SELECT campaignID, campaign, userID, isLayoutSpecific
                   FROM campaign WHERE campaignID = ?",
                [campaign_id],
                campaign_from_row,
            )
            .optional()
            .map_err(from_rusqlite)?;
        campaign.map(|c| self.with_layout_ids(c)).transpose()
    }

    fn get_by_layout_id(&self, layout_id: i64) -> ExResult<Vec<Campaign>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT c.campaignID, c.campaign, c.userID, c.isLayoutSpecific
                   FROM campaign c
                  INNER JOIN lkcampaignlayout lk ON lk.campaignID = c.campaignID
                  WHERE lk.layoutID = ?
                  ORDER BY c.campaignID",
            )
            .map_err(from_rusqlite)?;
        let campaigns = stmt
            .query_map([layout_id], campaign_from_row)
            .map_err(from_rusqlite)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(from_rusqlite)?;

        campaigns
            .into_iter()
            .map(|c| self.with_layout_ids(c))
            .collect()
    }

    fn save(&self, campaign: &mut Campaign) -> ExResult<()> {
        let campaign_id = match campaign.campaign_id {
            Some(id) => {
                self.conn
                    .execute(
                        "UPDATE campaign SET campaign = ?1, userID = ?2, isLayoutSpecific = ?3
                          WHERE campaignID = ?4",
                        params![
                            campaign.campaign,
                            campaign.owner_id,
                            campaign.is_layout_specific,
                            id
                        ],
                    )
                    .map_err(from_rusqlite)?;
                id
            }
            None => {
                self.conn
                    .execute(
                        "INSERT INTO campaign (campaign, userID, isLayoutSpecific) VALUES (?1, ?2, ?3)",
                        params![
                            campaign.campaign,
                            campaign.owner_id,
                            campaign.is_layout_specific
                        ],
                    )
                    .map_err(from_rusqlite)?;
                let id = self.conn.last_insert_rowid();
                campaign.campaign_id = Some(id);
                id
            }
        };

        // Links held by other layouts are left as stored
        for layout_id in &campaign.assigned_layout_ids {
            let order = campaign.display_order(*layout_id).unwrap_or(1);
            self.conn
                .execute(
                    "INSERT INTO lkcampaignlayout (campaignID, layoutID, displayOrder)
                     VALUES (?1, ?2, ?3)
                     ON CONFLICT (campaignID, layoutID) DO UPDATE SET
                        displayOrder = excluded.displayOrder",
                    params![campaign_id, layout_id, order],
                )
                .map_err(from_rusqlite)?;
        }
        for layout_id in &campaign.unassigned_layout_ids {
            self.conn
                .execute(
                    "DELETE FROM lkcampaignlayout WHERE campaignID = ?1 AND layoutID = ?2",
                    params![campaign_id, layout_id],
                )
                .map_err(from_rusqlite)?;
        }
        campaign.clear_pending();
        Ok(())
    }

    fn delete(&self, campaign: &Campaign) -> ExResult<()> {
        let Some(campaign_id) = campaign.campaign_id else {
            return Ok(());
        };

        self.conn
            .execute(
                "DELETE FROM permission WHERE entity = ?1 AND objectId = ?2",
                params![CAMPAIGN_ENTITY, campaign_id],
            )
            .map_err(from_rusqlite)?;
        self.conn
            .execute("DELETE FROM lkcampaignlayout WHERE campaignID = ?", [campaign_id])
            .map_err(from_rusqlite)?;
        self.conn
            .execute("DELETE FROM campaign WHERE campaignID = ?", [campaign_id])
            .map_err(from_rusqlite)?;
        Ok(())
    }
}
