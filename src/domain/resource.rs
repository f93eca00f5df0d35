//! Resource domain entity and related types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::attributes::{AttributeModel, AttributeSpec, AttributeTable};
use crate::domain::geo::Located;
use crate::domain::validation::{check_latitude, check_longitude, parse_f64, ValidationError};

/// Service category of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Shelter,
    FoodBank,
    Clinic,
    Restroom,
    Other,
}

impl ResourceType {
    /// Canonical uppercase form, as stored and served.
    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceType::Shelter => "SHELTER",
            ResourceType::FoodBank => "FOOD_BANK",
            ResourceType::Clinic => "CLINIC",
            ResourceType::Restroom => "RESTROOM",
            ResourceType::Other => "OTHER",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = ValidationError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SHELTER" => Ok(ResourceType::Shelter),
            "FOOD_BANK" => Ok(ResourceType::FoodBank),
            "CLINIC" => Ok(ResourceType::Clinic),
            "RESTROOM" => Ok(ResourceType::Restroom),
            "OTHER" => Ok(ResourceType::Other),
            _ => Err(ValidationError::new(
                "resourcetype",
                "Invalid resource type provided",
            )),
        }
    }
}

/// Resource directory entry.
///
/// Timestamps are exposed read-only through the attribute namespace;
/// `resourcehours` is free-form text and carries no content validation.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Resource {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "Midtown Shelter")]
    name: String,
    resource_type: ResourceType,
    #[schema(example = 40.7549)]
    latitude: f64,
    #[schema(example = -73.9840)]
    longitude: f64,
    /// Opening hours, free-form.
    #[schema(example = "Mon-Fri 9:00-17:00")]
    hours: String,
    /// Free-form description, optional.
    #[schema(example = "Overnight beds and meals")]
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Resource {
    /// Create a resource, validating every field.
    pub fn new(
        name: impl Into<String>,
        resource_type: ResourceType,
        latitude: f64,
        longitude: f64,
        hours: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, ValidationError> {
        let now = Utc::now();
        Ok(Self {
            id: 0,
            name: Self::check_name(name.into())?,
            resource_type,
            latitude: check_latitude(latitude)?,
            longitude: check_longitude(longitude)?,
            hours: hours.into(),
            description,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a resource from stored values.
    #[allow(clippy::too_many_arguments)]
    pub fn from_storage(
        id: i32,
        name: String,
        resource_type: ResourceType,
        latitude: f64,
        longitude: f64,
        hours: String,
        description: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            resource_type,
            latitude,
            longitude,
            hours,
            description,
            created_at,
            updated_at,
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

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn hours(&self) -> &str {
        &self.hours
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

    /// Update the resource name. Must not be blank.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = Self::check_name(name.into())?;
        self.touch();
        Ok(())
    }

    pub fn set_resource_type(&mut self, resource_type: ResourceType) {
        self.resource_type = resource_type;
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

    pub fn set_hours(&mut self, hours: impl Into<String>) {
        self.hours = hours.into();
        self.touch();
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn check_name(name: String) -> Result<String, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::new(
                "resourcename",
                "Resource name cannot be empty",
            ));
        }
        Ok(name)
    }
}

impl Located for Resource {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }
}

static RESOURCE_ATTRIBUTES: Lazy<AttributeTable<Resource>> = Lazy::new(|| {
    AttributeTable::new(vec![
        AttributeSpec::writable(
            "resourcename",
            |r| Value::from(r.name.clone()),
            |r, raw| r.set_name(raw),
        ),
        AttributeSpec::writable(
            "resourcetype",
            |r| Value::from(r.resource_type.as_str()),
            |r, raw| {
                r.set_resource_type(raw.parse()?);
                Ok(())
            },
        ),
        AttributeSpec::writable(
            "latitude",
            |r| Value::from(r.latitude),
            |r, raw| r.set_latitude(parse_f64("latitude", "Latitude", raw)?),
        ),
        AttributeSpec::writable(
            "longitude",
            |r| Value::from(r.longitude),
            |r, raw| r.set_longitude(parse_f64("longitude", "Longitude", raw)?),
        ),
        AttributeSpec::writable(
            "resourcehours",
            |r| Value::from(r.hours.clone()),
            |r, raw| {
                r.set_hours(raw);
                Ok(())
            },
        ),
        AttributeSpec::writable(
            "description",
            |r| r.description().map(Value::from).unwrap_or(Value::Null),
            |r, raw| {
                r.set_description(Some(raw.to_string()));
                Ok(())
            },
        ),
        AttributeSpec::read_only("createdat", |r| Value::from(r.created_at.to_rfc3339())),
        AttributeSpec::read_only("updatedat", |r| Value::from(r.updated_at.to_rfc3339())),
    ])
});

impl AttributeModel for Resource {
    fn attribute_table() -> &'static AttributeTable<Self> {
        &RESOURCE_ATTRIBUTES
    }
}

/// Resource creation data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewResource {
    /// Resource name
    #[schema(example = "Midtown Shelter")]
    pub name: String,
    /// SHELTER, FOOD_BANK, CLINIC, RESTROOM or OTHER (any casing accepted)
    #[schema(example = "SHELTER")]
    pub resource_type: String,
    /// Latitude in decimal degrees
    #[schema(example = 40.7549)]
    pub latitude: f64,
    /// Longitude in decimal degrees
    #[schema(example = -73.9840)]
    pub longitude: f64,
    /// Opening hours, free-form
    #[schema(example = "Mon-Fri 9:00-17:00")]
    pub hours: String,
    /// Free-form description
    #[schema(example = "Overnight beds and meals")]
    pub description: Option<String>,
}
