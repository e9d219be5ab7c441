// PostgREST implementation of the store ports.
//
// Responsibilities
// - Map collection reads, edge reads/inserts/deletes and profile lookups onto `/rest/v1/<table>`.
// - Translate HTTP 409 on insert into a uniqueness violation.
//
// Boundaries
// - Authentication is a bearer token handed in from outside; no session handling here.

use crate::modules::campus::adapters::outbound::store::{
    EdgeStore, ProfileStore, RecordStore, StoreError,
};
use crate::modules::campus::core::collections::{Clubs, Collection};
use crate::modules::campus::core::edges::MembershipEdge;
use crate::modules::campus::core::profile::{ClubMembershipDetail, Profile};
use crate::modules::campus::core::records::SortKey;
use crate::shared::core::primitives::{RecordId, UserId};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct PostgrestStore {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl PostgrestStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            access_token: None,
        }
    }

    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }

    async fn send(table: &str, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("{table}: {e}")))?;
        debug!(table, status = %response.status(), "store responded");
        Ok(response)
    }

    async fn rows<T: DeserializeOwned>(table: &str, response: Response) -> Result<Vec<T>, StoreError> {
        let response = ensure_success(table, response).await?;
        response.json::<Vec<T>>().await.map_err(|e| StoreError::Malformed {
            table: table.to_string(),
            reason: e.to_string(),
        })
    }
}

fn eq(value: &str) -> String {
    format!("eq.{value}")
}

async fn ensure_success(table: &str, response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Backend(format!("{table}: {status} {body}")))
}

fn parse_timestamp(table: &str, value: &str) -> Result<i64, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.timestamp_millis())
        .map_err(|e| StoreError::Malformed {
            table: table.to_string(),
            reason: format!("timestamp {value}: {e}"),
        })
}

fn edge_from_row<C: Collection>(row: &Value) -> Result<MembershipEdge, StoreError> {
    let field = |name: &str| {
        row.get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::Malformed {
                table: C::EDGE_TABLE.to_string(),
                reason: format!("missing {name}"),
            })
    };
    Ok(MembershipEdge {
        edge_id: field("id")?.to_string(),
        user_id: UserId::new(field("user_id")?),
        record_id: RecordId::new(field(C::EDGE_FOREIGN_KEY)?),
        created_at: parse_timestamp(C::EDGE_TABLE, field(C::EDGE_TIMESTAMP)?)?,
    })
}

#[async_trait]
impl<C: Collection> RecordStore<C> for PostgrestStore {
    async fn list_ordered(&self, order_by: SortKey) -> Result<Vec<C::Record>, StoreError> {
        let order = format!("{}.asc", order_by.column());
        let request = self
            .request(Method::GET, C::TABLE)
            .query(&[("select", "*"), ("order", order.as_str())]);
        let response = Self::send(C::TABLE, request).await?;
        Self::rows(C::TABLE, response).await
    }
}

#[async_trait]
impl<C: Collection> EdgeStore<C> for PostgrestStore {
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<MembershipEdge>, StoreError> {
        let request = self
            .request(Method::GET, C::EDGE_TABLE)
            .query(&[("select", "*".to_string()), ("user_id", eq(user_id.as_str()))]);
        let response = Self::send(C::EDGE_TABLE, request).await?;
        let rows: Vec<Value> = Self::rows(C::EDGE_TABLE, response).await?;
        rows.iter().map(edge_from_row::<C>).collect()
    }

    async fn insert(
        &self,
        user_id: &UserId,
        record_id: &RecordId,
    ) -> Result<MembershipEdge, StoreError> {
        let mut body = Map::new();
        body.insert("user_id".into(), Value::from(user_id.as_str()));
        body.insert(C::EDGE_FOREIGN_KEY.into(), Value::from(record_id.as_str()));
        let request = self
            .request(Method::POST, C::EDGE_TABLE)
            .header("Prefer", "return=representation")
            .json(&Value::Object(body));
        let response = Self::send(C::EDGE_TABLE, request).await?;
        if response.status() == StatusCode::CONFLICT {
            return Err(StoreError::UniqueViolation {
                table: C::EDGE_TABLE.to_string(),
                user_id: user_id.clone(),
                record_id: record_id.clone(),
            });
        }
        let rows: Vec<Value> = Self::rows(C::EDGE_TABLE, response).await?;
        let row = rows.first().ok_or_else(|| StoreError::Malformed {
            table: C::EDGE_TABLE.to_string(),
            reason: "insert returned no row".into(),
        })?;
        edge_from_row::<C>(row)
    }

    async fn delete(&self, user_id: &UserId, record_id: &RecordId) -> Result<(), StoreError> {
        let request = self.request(Method::DELETE, C::EDGE_TABLE).query(&[
            ("user_id", eq(user_id.as_str())),
            (C::EDGE_FOREIGN_KEY, eq(record_id.as_str())),
        ]);
        let response = Self::send(C::EDGE_TABLE, request).await?;
        ensure_success(C::EDGE_TABLE, response).await?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct ProfileRow {
    id: String,
    full_name: String,
    email: String,
    created_at: String,
}

#[derive(Deserialize)]
struct ClubSummaryRow {
    name: String,
    category: String,
    #[serde(default)]
    icon: String,
}

#[derive(Deserialize)]
struct ClubMembershipRow {
    id: String,
    club_id: String,
    joined_at: String,
    clubs: ClubSummaryRow,
}

#[async_trait]
impl ProfileStore for PostgrestStore {
    async fn profile(&self, user_id: &UserId) -> Result<Profile, StoreError> {
        let request = self
            .request(Method::GET, "profiles")
            .query(&[("select", "*".to_string()), ("id", eq(user_id.as_str()))]);
        let response = Self::send("profiles", request).await?;
        let rows: Vec<ProfileRow> = Self::rows("profiles", response).await?;
        let row = rows.into_iter().next().ok_or_else(|| StoreError::NotFound {
            table: "profiles".into(),
        })?;
        Ok(Profile {
            user_id: UserId::new(row.id),
            full_name: row.full_name,
            email: row.email,
            created_at: parse_timestamp("profiles", &row.created_at)?,
        })
    }

    async fn club_memberships(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ClubMembershipDetail>, StoreError> {
        let request = self.request(Method::GET, Clubs::EDGE_TABLE).query(&[
            (
                "select",
                "id,club_id,joined_at,clubs(name,category,icon)".to_string(),
            ),
            ("user_id", eq(user_id.as_str())),
        ]);
        let response = Self::send(Clubs::EDGE_TABLE, request).await?;
        let rows: Vec<ClubMembershipRow> = Self::rows(Clubs::EDGE_TABLE, response).await?;
        rows.into_iter()
            .map(|row| {
                Ok(ClubMembershipDetail {
                    membership_id: row.id,
                    club_id: RecordId::new(row.club_id),
                    joined_at: parse_timestamp(Clubs::EDGE_TABLE, &row.joined_at)?,
                    club_name: row.clubs.name,
                    category: row.clubs.category,
                    icon: row.clubs.icon,
                })
            })
            .collect()
    }
}
