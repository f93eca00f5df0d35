//! User domain entity and related types.

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

/// Sex recorded on a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    /// Canonical uppercase form, as stored and served.
    pub const fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "MALE",
            Sex::Female => "FEMALE",
            Sex::Other => "OTHER",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ValidationError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MALE" => Ok(Sex::Male),
            "FEMALE" => Ok(Sex::Female),
            "OTHER" => Ok(Sex::Other),
            _ => Err(ValidationError::new("sex", "Invalid sex provided")),
        }
    }
}

/// User directory entry.
///
/// Fields are private: every mutation goes through a validating setter, and
/// a successful mutation refreshes `updated_at`. A failed mutation leaves
/// the entry untouched. The id is assigned by the store on first save and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct User {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "John Doe")]
    name: String,
    #[schema(example = "john.doe@example.com")]
    email: String,
    #[schema(example = 30)]
    age: i32,
    sex: Sex,
    #[schema(example = 40.7128)]
    latitude: f64,
    #[schema(example = -74.0060)]
    longitude: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    /// Number of community groups this user belongs to (derived).
    #[schema(example = 2)]
    community_count: i64,
}

impl User {
    /// Create a user, validating every field. Timestamps are set to now;
    /// the id stays unassigned until the store saves the entry.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        age: i32,
        sex: Sex,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, ValidationError> {
        let now = Utc::now();
        Ok(Self {
            id: 0,
            name: Self::check_name(name.into())?,
            email: Self::check_email(email.into())?,
            age: Self::check_age(age)?,
            sex,
            latitude: check_latitude(latitude)?,
            longitude: check_longitude(longitude)?,
            created_at: now,
            updated_at: now,
            community_count: 0,
        })
    }

    /// Rebuild a user from stored values. The store is trusted to hold
    /// data that passed validation when it was written.
    #[allow(clippy::too_many_arguments)]
    pub fn from_storage(
        id: i32,
        name: String,
        email: String,
        age: i32,
        sex: Sex,
        latitude: f64,
        longitude: f64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        community_count: i64,
    ) -> Self {
        Self {
            id,
            name,
            email,
            age,
            sex,
            latitude,
            longitude,
            created_at,
            updated_at,
            community_count,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    /// Whether the store has assigned this entry an id yet.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn community_count(&self) -> i64 {
        self.community_count
    }

    /// Update the display name. Must not be blank.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = Self::check_name(name.into())?;
        self.touch();
        Ok(())
    }

    /// Update the email address. Requires a plausible `local@domain` shape.
    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), ValidationError> {
        self.email = Self::check_email(email.into())?;
        self.touch();
        Ok(())
    }

    /// Update the age. Must not be negative.
    pub fn set_age(&mut self, age: i32) -> Result<(), ValidationError> {
        self.age = Self::check_age(age)?;
        self.touch();
        Ok(())
    }

    pub fn set_sex(&mut self, sex: Sex) {
        self.sex = sex;
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

    /// Set the derived membership count after loading. Not a mutation of
    /// the entry itself, so `updated_at` is left alone.
    pub fn set_community_count(&mut self, count: i64) {
        self.community_count = count;
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn check_name(name: String) -> Result<String, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::new("name", "Name cannot be empty"));
        }
        Ok(name)
    }

    fn check_email(email: String) -> Result<String, ValidationError> {
        let trimmed = email.trim();
        let valid = match trimmed.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            }
            None => false,
        };
        if !valid {
            return Err(ValidationError::new("email", "Invalid email address"));
        }
        Ok(trimmed.to_string())
    }

    fn check_age(age: i32) -> Result<i32, ValidationError> {
        if age < 0 {
            return Err(ValidationError::new("age", "Age cannot be negative"));
        }
        Ok(age)
    }
}

impl Located for User {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

static USER_ATTRIBUTES: Lazy<AttributeTable<User>> = Lazy::new(|| {
    AttributeTable::new(vec![
        AttributeSpec::writable(
            "name",
            |u| Value::from(u.name.clone()),
            |u, raw| u.set_name(raw),
        ),
        AttributeSpec::writable(
            "email",
            |u| Value::from(u.email.clone()),
            |u, raw| u.set_email(raw),
        ),
        AttributeSpec::writable(
            "age",
            |u| Value::from(u.age),
            |u, raw| u.set_age(parse_i32("age", "Age", raw)?),
        ),
        AttributeSpec::writable(
            "sex",
            |u| Value::from(u.sex.as_str()),
            |u, raw| {
                u.set_sex(raw.parse()?);
                Ok(())
            },
        ),
        AttributeSpec::writable(
            "latitude",
            |u| Value::from(u.latitude),
            |u, raw| u.set_latitude(parse_f64("latitude", "Latitude", raw)?),
        ),
        AttributeSpec::writable(
            "longitude",
            |u| Value::from(u.longitude),
            |u, raw| u.set_longitude(parse_f64("longitude", "Longitude", raw)?),
        ),
        AttributeSpec::read_only("communitycount", |u| Value::from(u.community_count)),
    ])
});

impl AttributeModel for User {
    fn attribute_table() -> &'static AttributeTable<Self> {
        &USER_ATTRIBUTES
    }
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewUser {
    /// Display name
    #[schema(example = "John Doe")]
    pub name: String,
    /// Email address
    #[schema(example = "john.doe@example.com")]
    pub email: String,
    /// Age in years
    #[schema(example = 30)]
    pub age: i32,
    /// MALE, FEMALE or OTHER (any casing accepted)
    #[schema(example = "FEMALE")]
    pub sex: String,
    /// Latitude in decimal degrees
    #[schema(example = 40.7128)]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[schema(example = -74.0060)]
    pub longitude: f64,
}
