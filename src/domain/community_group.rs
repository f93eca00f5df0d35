//! Community group domain entity and related types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::attributes::{AttributeModel, AttributeSpec, AttributeTable};
use crate::domain::geo::Located;
use crate::domain::validation::{
    check_latitude, check_longitude, parse_f64, parse_i32, ValidationError,
};

/// Service category of a community group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommunityType {
    MentalHealth,
    EmploymentAssistance,
    Other,
}

impl CommunityType {
    /// Canonical uppercase form, as stored and served.
    pub const fn as_str(self) -> &'static str {
        match self {
            CommunityType::MentalHealth => "MENTAL_HEALTH",
            CommunityType::EmploymentAssistance => "EMPLOYMENT_ASSISTANCE",
            CommunityType::Other => "OTHER",
        }
    }
}

impl fmt::Display for CommunityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommunityType {
    type Err = ValidationError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MENTAL_HEALTH" => Ok(CommunityType::MentalHealth),
            "EMPLOYMENT_ASSISTANCE" => Ok(CommunityType::EmploymentAssistance),
            "OTHER" => Ok(CommunityType::Other),
            _ => Err(ValidationError::new(
                "communitytype",
                "Invalid community type provided",
            )),
        }
    }
}

/// Community group directory entry.
///
/// Same mutation discipline as [`crate::domain::User`]: private fields,
/// validating setters, `updated_at` refreshed only on success.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CommunityGroup {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "East Village Support Circle")]
    name: String,
    community_type: CommunityType,
    #[schema(example = 40.7306)]
    latitude: f64,
    #[schema(example = -73.9352)]
    longitude: f64,
    #[schema(example = 25)]
    capacity: i32,
    /// Free-form description, optional.
    #[schema(example = "Weekly peer support meetings")]
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Number of users belonging to this group (derived).
    #[schema(example = 12)]
    user_count: i64,
}

impl CommunityGroup {
    /// Create a community group, validating every field.
    pub fn new(
        name: impl Into<String>,
        community_type: CommunityType,
        latitude: f64,
        longitude: f64,
        capacity: i32,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        let now = Utc::now();
        Ok(Self {
            id: 0,
            name: Self::check_name(name.into())?,
            community_type,
            latitude: check_latitude(latitude)?,
            longitude: check_longitude(longitude)?,
            capacity: Self::check_capacity(capacity)?,
            description,
            created_at: now,
            updated_at: now,
            user_count: 0,
        })
    }

    /// Rebuild a group from stored values.
    #[allow(clippy::too_many_arguments)]
    pub fn from_storage(
        id: i32,
        name: String,
        community_type: CommunityType,
        latitude: f64,
        longitude: f64,
        capacity: i32,
        description: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        user_count: i64,
    ) -> Self {
        Self {
            id,
            name,
            community_type,
            latitude,
            longitude,
            capacity,
            description,
            created_at,
            updated_at,
            user_count,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn community_type(&self) -> CommunityType {
        self.community_type
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn user_count(&self) -> i64 {
        self.user_count
    }

    /// Update the group name. Must not be blank.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = Self::check_name(name.into())?;
        self.touch();
        Ok(())
    }

    pub fn set_community_type(&mut self, community_type: CommunityType) {
        self.community_type = community_type;
        self.touch();
    }

    pub fn set_latitude(&mut self, latitude: f64) -> Result<(), ValidationError> {
        self.latitude = check_latitude(latitude)?;
        self.touch();
        Ok(())
    }

    pub fn set_longitude(&mut self, longitude: f64) -> Result<(), ValidationError> {
        self.longitude = check_longitude(longitude)?;
        self.touch();
        Ok(())
    }

    /// Update the capacity. Must not be negative.
    pub fn set_capacity(&mut self, capacity: i32) -> Result<(), ValidationError> {
        self.capacity = Self::check_capacity(capacity)?;
        self.touch();
        Ok(())
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    /// Set the derived member count after loading.
    pub fn set_user_count(&mut self, count: i64) {
        self.user_count = count;
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn check_name(name: String) -> Result<String, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::new(
                "communityname",
                "Community name cannot be empty",
            ));
        }
        Ok(name)
    }

    fn check_capacity(capacity: i32) -> Result<i32, ValidationError> {
        if capacity < 0 {
            return Err(ValidationError::new(
                "capacity",
                "Capacity cannot be negative",
            ));
        }
        Ok(capacity)
    }
}

impl Located for CommunityGroup {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

static COMMUNITY_GROUP_ATTRIBUTES: Lazy<AttributeTable<CommunityGroup>> = Lazy::new(|| {
    AttributeTable::new(vec![
        AttributeSpec::writable(
            "communityname",
            |g| Value::from(g.name.clone()),
            |g, raw| g.set_name(raw),
        ),
        AttributeSpec::writable(
            "communitytype",
            |g| Value::from(g.community_type.as_str()),
            |g, raw| {
                g.set_community_type(raw.parse()?);
                Ok(())
            },
        ),
        AttributeSpec::writable(
            "latitude",
            |g| Value::from(g.latitude),
            |g, raw| g.set_latitude(parse_f64("latitude", "Latitude", raw)?),
        ),
        AttributeSpec::writable(
            "longitude",
            |g| Value::from(g.longitude),
            |g, raw| g.set_longitude(parse_f64("longitude", "Longitude", raw)?),
        ),
        AttributeSpec::writable(
            "capacity",
            |g| Value::from(g.capacity),
            |g, raw| g.set_capacity(parse_i32("capacity", "Capacity", raw)?),
        ),
        AttributeSpec::writable(
            "description",
            |g| g.description().map(Value::from).unwrap_or(Value::Null),
            |g, raw| {
                g.set_description(Some(raw.to_string()));
                Ok(())
            },
        ),
        AttributeSpec::read_only("usercount", |g| Value::from(g.user_count)),
    ])
});

impl AttributeModel for CommunityGroup {
    fn attribute_table() -> &'static AttributeTable<Self> {
        &COMMUNITY_GROUP_ATTRIBUTES
    }
}

/// Community group creation data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewCommunityGroup {
    /// Group name
    #[schema(example = "East Village Support Circle")]
    pub name: String,
    /// MENTAL_HEALTH, EMPLOYMENT_ASSISTANCE or OTHER (any casing accepted)
    #[schema(example = "MENTAL_HEALTH")]
    pub community_type: String,
    /// Latitude in decimal degrees
    #[schema(example = 40.7306)]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[schema(example = -73.9352)]
    pub longitude: f64,
    /// Maximum member count
    #[schema(example = 25)]
    pub capacity: i32,
    /// Free-form description
    #[schema(example = "Weekly peer support meetings")]
    pub description: Option<String>,
}
