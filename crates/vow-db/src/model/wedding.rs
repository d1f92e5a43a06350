use diesel::{pg::Pg, prelude::*};
use vow_core::content::model::{ContentRecord, PartialContentRecord, PartialDetails};

use crate::db::schema;
use crate::error::DbResult;

/// One row of `weddings`: the stored content of a wedding page.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::weddings)]
#[diesel(check_for_backend(Pg))]
pub struct Wedding {
    pub id: uuid::Uuid,
    pub slug: String,
    pub music_url: Option<String>,
    pub hero_image: Option<String>,
    pub album_urls: Option<Vec<Option<String>>>,
    pub qr_groom: Option<String>,
    pub qr_bride: Option<String>,
    pub details: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Wedding {
    /// ## Summary
    /// Reads the row as a partial content record for the merge resolver.
    ///
    /// A `details` document that does not have the expected shape is dropped
    /// (logged), so its fields resolve to defaults.
    #[must_use]
    pub fn into_partial(self) -> PartialContentRecord {
        let details = self
            .details
            .map(PartialDetails::from_json)
            .transpose()
            .unwrap_or_else(|error| {
                tracing::warn!(slug = %self.slug, %error, "Ignoring malformed wedding details");
                None
            });

        PartialContentRecord {
            id: Some(self.id),
            slug: Some(self.slug),
            hero_image: self.hero_image,
            music_url: self.music_url,
            album_urls: self.album_urls,
            qr_groom: self.qr_groom,
            qr_bride: self.qr_bride,
            details,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::weddings)]
pub struct NewWedding {
    pub id: uuid::Uuid,
    pub slug: String,
    #[diesel(embed)]
    pub content: WeddingContent,
}

impl NewWedding {
    /// ## Summary
    /// Row for seeding `record` under its slug.
    ///
    /// ## Errors
    /// Returns an error if the details cannot be encoded as JSON.
    pub fn from_record(record: &ContentRecord) -> DbResult<Self> {
        Ok(Self {
            id: uuid::Uuid::now_v7(),
            slug: record.slug.clone(),
            content: WeddingContent::from_record(record)?,
        })
    }
}

/// Every content column of a wedding, written together on save.
#[derive(Debug, Clone, PartialEq, Insertable, AsChangeset)]
#[diesel(table_name = schema::weddings)]
#[diesel(treat_none_as_null = true)]
pub struct WeddingContent {
    pub music_url: Option<String>,
    pub hero_image: Option<String>,
    pub album_urls: Option<Vec<Option<String>>>,
    pub qr_groom: Option<String>,
    pub qr_bride: Option<String>,
    pub details: Option<serde_json::Value>,
}

impl WeddingContent {
    /// ## Errors
    /// Returns an error if the details cannot be encoded as JSON.
    pub fn from_record(record: &ContentRecord) -> DbResult<Self> {
        let details = serde_json::to_value(&record.details).map_err(|e| {
            vow_core::error::CoreError::ValidationError(format!("unencodable details: {e}"))
        })?;

        Ok(Self {
            music_url: Some(record.music_url.clone()),
            hero_image: Some(record.hero_image.clone()),
            album_urls: Some(record.album_urls.iter().cloned().map(Some).collect()),
            qr_groom: Some(record.qr_groom.clone()),
            qr_bride: Some(record.qr_bride.clone()),
            details: Some(details),
        })
    }

    /// Writes these columns onto an in-memory row.
    pub fn apply_to(&self, wedding: &mut Wedding) {
        wedding.music_url.clone_from(&self.music_url);
        wedding.hero_image.clone_from(&self.hero_image);
        wedding.album_urls.clone_from(&self.album_urls);
        wedding.qr_groom.clone_from(&self.qr_groom);
        wedding.qr_bride.clone_from(&self.qr_bride);
        wedding.details.clone_from(&self.details);
    }
}
