use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use crate::adapter::db::session::SqlxSession;
use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::gateway::profile::{
    ProfileReader, ProfileStore, ProfileStoreHandle, ProfileWriter,
};
use crate::domain::entities::id::Id;
use crate::domain::entities::identity::Identity;
use crate::domain::entities::profile::{Gender, Profile, ProfileDetails};

#[derive(Clone)]
pub struct ProfileGateway {
    session: SqlxSession,
}

fn gender_to_str(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "male",
        Gender::Female => "female",
        Gender::Other => "other",
    }
}

fn gender_from_str(value: &str) -> AppResult<Gender> {
    match value {
        "male" => Ok(Gender::Male),
        "female" => Ok(Gender::Female),
        "other" => Ok(Gender::Other),
        unknown => Err(AppError::InvalidId(format!("Unknown gender value: {unknown}"))),
    }
}

impl ProfileGateway {
    pub fn new(session: SqlxSession) -> Self {
        Self { session }
    }

    fn map_profile(result: Option<PgRow>) -> AppResult<Option<Profile>> {
        let Some(row) = result else {
            return Ok(None);
        };
        let gender: String = row.try_get("gender")?;
        let user_type: String = row.try_get("user_type")?;
        let details = match user_type.as_str() {
            "nunny" => ProfileDetails::Nunny {
                phone_number: row.try_get::<Option<String>, _>("phone_number")?.unwrap_or_default(),
                services: row.try_get::<Option<Vec<String>>, _>("services")?.unwrap_or_default(),
                age_range: row.try_get::<Option<String>, _>("age_range")?.unwrap_or_default(),
            },
            _ => ProfileDetails::Client {
                service_description: row
                    .try_get::<Option<String>, _>("service_description")?
                    .unwrap_or_default(),
                daily_rate: row.try_get::<Option<i32>, _>("daily_rate")?.unwrap_or_default() as u32,
            },
        };
        Ok(Some(Profile {
            id: Id::new(row.try_get("id")?),
            identity_id: Id::new(row.try_get("identity_id")?),
            email: row.try_get("email")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            gender: gender_from_str(&gender)?,
            id_number: row.try_get("id_number")?,
            region: row.try_get("region")?,
            county: row.try_get("county")?,
            profile_picture_url: row.try_get("profile_picture_url")?,
            id_image_url: row.try_get("id_image_url")?,
            is_verified: row.try_get("is_verified")?,
            created_at: row.try_get("created_at")?,
            rating: row.try_get("rating")?,
            review_count: row.try_get::<Option<i32>, _>("review_count")?.map(|count| count as u32),
            details,
        }))
    }

    fn variant_columns(details: &ProfileDetails) -> (
        &'static str,
        Option<String>,
        Option<Vec<String>>,
        Option<String>,
        Option<String>,
        Option<i32>,
    ) {
        match details {
            ProfileDetails::Nunny {
                phone_number,
                services,
                age_range,
            } => (
                "nunny",
                Some(phone_number.clone()),
                Some(services.clone()),
                Some(age_range.clone()),
                None,
                None,
            ),
            ProfileDetails::Client {
                service_description,
                daily_rate,
            } => (
                "client",
                None,
                None,
                None,
                Some(service_description.clone()),
                Some(*daily_rate as i32),
            ),
        }
    }
}

#[async_trait]
impl ProfileReader for ProfileGateway {
    async fn find_by_identity(&self, identity_id: &Id<Identity>) -> AppResult<Option<Profile>> {
        self.session
            .with_tx(|tx| {
                let identity_id = identity_id.value;
                async move {
                    let result = sqlx::query(
                        r#"
                            SELECT
                                id, identity_id, email, first_name, last_name, gender,
                                id_number, region, county, profile_picture_url, id_image_url,
                                is_verified, created_at, rating, review_count, user_type,
                                phone_number, services, age_range, service_description, daily_rate
                            FROM
                                profiles
                            WHERE identity_id = $1
                        "#,
                    )
                    .bind(identity_id)
                    .fetch_optional(tx.as_mut())
                    .await?;

                    Self::map_profile(result)
                }
                .boxed()
            })
            .await
    }
}

#[async_trait]
impl ProfileWriter for ProfileGateway {
    async fn insert(&self, profile: Profile) -> AppResult<Id<Profile>> {
        self.session
            .with_tx(|tx| {
                let profile = profile.clone();
                async move {
                    let (user_type, phone_number, services, age_range, service_description, daily_rate) =
                        Self::variant_columns(&profile.details);
                    let result = sqlx::query(
                        r#"
                            INSERT INTO profiles
                                (id, identity_id, email, first_name, last_name, gender,
                                 id_number, region, county, profile_picture_url, id_image_url,
                                 is_verified, created_at, user_type,
                                 phone_number, services, age_range, service_description, daily_rate)
                            VALUES
                                ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                                 $11, $12, $13, $14, $15, $16, $17, $18, $19)
                            RETURNING
                                id
                        "#,
                    )
                    .bind(profile.id.value)
                    .bind(profile.identity_id.value)
                    .bind(&profile.email)
                    .bind(&profile.first_name)
                    .bind(&profile.last_name)
                    .bind(gender_to_str(profile.gender))
                    .bind(&profile.id_number)
                    .bind(&profile.region)
                    .bind(&profile.county)
                    .bind(&profile.profile_picture_url)
                    .bind(&profile.id_image_url)
                    .bind(profile.is_verified)
                    .bind(profile.created_at)
                    .bind(user_type)
                    .bind(&phone_number)
                    .bind(&services)
                    .bind(&age_range)
                    .bind(&service_description)
                    .bind(daily_rate)
                    .fetch_one(tx.as_mut())
                    .await
                    .map_err(|err| match &err {
                        // The uniqueness constraint on identity_id is the
                        // guard against double materialization.
                        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::ProfileExists,
                        _ => AppError::DatabaseError(err),
                    })?;
                    let id: Uuid = result.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }

    async fn update(&self, profile: Profile) -> AppResult<Id<Profile>> {
        self.session
            .with_tx(|tx| {
                let profile = profile.clone();
                async move {
                    let (user_type, phone_number, services, age_range, service_description, daily_rate) =
                        Self::variant_columns(&profile.details);
                    let result = sqlx::query(
                        r#"
                            UPDATE
                                profiles
                            SET
                                first_name = $2, last_name = $3, gender = $4, region = $5,
                                county = $6, profile_picture_url = $7,
                                phone_number = $9, services = $10, age_range = $11,
                                service_description = $12, daily_rate = $13,
                                updated_at = now()
                            WHERE
                                id = $1 AND user_type = $8
                            RETURNING
                                id
                        "#,
                    )
                    .bind(profile.id.value)
                    .bind(&profile.first_name)
                    .bind(&profile.last_name)
                    .bind(gender_to_str(profile.gender))
                    .bind(&profile.region)
                    .bind(&profile.county)
                    .bind(&profile.profile_picture_url)
                    .bind(user_type)
                    .bind(&phone_number)
                    .bind(&services)
                    .bind(&age_range)
                    .bind(&service_description)
                    .bind(daily_rate)
                    .fetch_optional(tx.as_mut())
                    .await?;
                    let row = result.ok_or(AppError::ProfileNotFound)?;
                    let id: Uuid = row.try_get("id")?;
                    Ok(Id::new(id))
                }
                .boxed()
            })
            .await
    }
}

/// Opens one lazy transaction per handle over the shared pool.
pub struct SqlxProfileStore {
    pool: Pool<Postgres>,
}

impl SqlxProfileStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

impl ProfileStore for SqlxProfileStore {
    fn open(&self) -> ProfileStoreHandle {
        let session = SqlxSession::new_lazy(self.pool.clone());
        let gateway = ProfileGateway::new(session.clone());
        ProfileStoreHandle {
            session: Arc::new(session),
            reader: Arc::new(gateway.clone()),
            writer: Arc::new(gateway),
        }
    }
}
