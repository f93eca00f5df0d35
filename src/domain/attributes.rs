//! Attribute-level access to directory entities.
//!
//! Each entity type owns a fixed table mapping lowercase attribute names to
//! read and write accessors. Lookup is case-insensitive. Write accessors
//! parse the raw textual value through the entity's own setters, so a failed
//! write leaves the entity exactly as it was.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::domain::validation::ValidationError;

/// Why an attribute operation did not succeed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// The name is outside the entity's attribute set. Writes to read-only
    /// attributes report this too: the writable set is a strict subset of
    /// the readable set.
    #[error("Attribute Not Found")]
    NotFound,

    /// The value failed parsing or the entity's validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

type ReadFn<E> = fn(&E) -> Value;
type WriteFn<E> = fn(&mut E, &str) -> Result<(), ValidationError>;

/// One named attribute of an entity type.
pub struct AttributeSpec<E> {
    name: &'static str,
    read: ReadFn<E>,
    write: Option<WriteFn<E>>,
}

impl<E> AttributeSpec<E> {
    /// A readable and writable attribute.
    pub const fn writable(name: &'static str, read: ReadFn<E>, write: WriteFn<E>) -> Self {
        Self {
            name,
            read,
            write: Some(write),
        }
    }

    /// A derived or immutable attribute: readable, rejected on write.
    pub const fn read_only(name: &'static str, read: ReadFn<E>) -> Self {
        Self {
            name,
            read,
            write: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_writable(&self) -> bool {
        self.write.is_some()
    }
}

/// Case-insensitive name-to-accessor lookup for one entity type.
pub struct AttributeTable<E> {
    specs: HashMap<&'static str, AttributeSpec<E>>,
}

impl<E> AttributeTable<E> {
    /// Build a table. Names must be lowercase and unique.
    pub fn new(specs: Vec<AttributeSpec<E>>) -> Self {
        let mut map = HashMap::with_capacity(specs.len());
        for spec in specs {
            debug_assert!(
                !spec.name.chars().any(|c| c.is_ascii_uppercase()),
                "attribute names are registered lowercase"
            );
            let previous = map.insert(spec.name, spec);
            debug_assert!(previous.is_none(), "duplicate attribute name");
        }
        Self { specs: map }
    }

    fn get(&self, name: &str) -> Option<&AttributeSpec<E>> {
        self.specs.get(name.to_ascii_lowercase().as_str())
    }

    /// Registered attribute names, unordered.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.specs.keys().copied()
    }
}

/// Entity types exposing attribute-level reads and writes.
pub trait AttributeModel: Sized + 'static {
    /// The fixed attribute table for this type.
    fn attribute_table() -> &'static AttributeTable<Self>;

    /// Read one named attribute.
    fn read_attribute(&self, name: &str) -> Result<Value, AttributeError> {
        match Self::attribute_table().get(name) {
            Some(spec) => Ok((spec.read)(self)),
            None => Err(AttributeError::NotFound),
        }
    }

    /// Parse `raw` into the named attribute through the entity's own
    /// validation.
    fn write_attribute(&mut self, name: &str, raw: &str) -> Result<(), AttributeError> {
        let spec = Self::attribute_table()
            .get(name)
            .ok_or(AttributeError::NotFound)?;
        let write = spec.write.ok_or(AttributeError::NotFound)?;
        write(self, raw).map_err(AttributeError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use once_cell::sync::Lazy;
    use serde_json::json;

    use super::*;

    struct Probe {
        level: i32,
        label: String,
    }

    static PROBE_ATTRIBUTES: Lazy<AttributeTable<Probe>> = Lazy::new(|| {
        AttributeTable::new(vec![
            AttributeSpec::writable(
                "level",
                |p| Value::from(p.level),
                |p, raw| {
                    p.level = crate::domain::validation::parse_i32("level", "Level", raw)?;
                    Ok(())
                },
            ),
            AttributeSpec::read_only("label", |p| Value::from(p.label.clone())),
        ])
    });

    impl AttributeModel for Probe {
        fn attribute_table() -> &'static AttributeTable<Self> {
            &PROBE_ATTRIBUTES
        }
    }

    fn probe() -> Probe {
        Probe {
            level: 3,
            label: "fixture".to_string(),
        }
    }

    #[test]
    fn reads_are_case_insensitive() {
        let p = probe();
        assert_eq!(p.read_attribute("level").unwrap(), json!(3));
        assert_eq!(p.read_attribute("LEVEL").unwrap(), json!(3));
        assert_eq!(p.read_attribute("Label").unwrap(), json!("fixture"));
    }

    #[test]
    fn unknown_names_are_not_found() {
        let p = probe();
        assert_eq!(p.read_attribute("bogus").unwrap_err(), AttributeError::NotFound);
    }

    #[test]
    fn writes_parse_through_validation() {
        let mut p = probe();
        p.write_attribute("Level", "7").unwrap();
        assert_eq!(p.level, 7);

        let err = p.write_attribute("level", "seven").unwrap_err();
        assert!(matches!(err, AttributeError::Invalid(_)));
        assert_eq!(p.level, 7);
    }

    #[test]
    fn read_only_attributes_reject_writes_as_not_found() {
        let mut p = probe();
        let err = p.write_attribute("label", "next").unwrap_err();
        assert_eq!(err, AttributeError::NotFound);
        assert_eq!(p.label, "fixture");
    }
}
