//! Model fixtures shared by the unit tests in this crate.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use refbase_types::{
    normalized_sort_key, Key, KeyList, KeyRefs, Model, RawRecord, ReferenceField, ResolutionCache,
};

use crate::registry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub key: Option<String>,
    pub fname: String,
    pub lname: String,
}

impl Model for Person {
    const TYPE_NAME: &'static str = "Person";

    fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn set_key(&mut self, key: String) {
        self.key = Some(key);
    }

    fn sort_key(&self) -> String {
        normalized_sort_key(&format!("{} {}", self.lname, self.fname))
    }

    fn identity_fields() -> &'static [&'static str] {
        &["fname", "lname"]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub key: Option<String>,
    #[serde(default)]
    pub person_key: Key<Person>,
    #[serde(skip)]
    pub person: Option<Arc<Person>>,
}

impl Model for Patient {
    const TYPE_NAME: &'static str = "Patient";

    fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn set_key(&mut self, key: String) {
        self.key = Some(key);
    }

    fn sort_key(&self) -> String {
        self.key.clone().unwrap_or_default()
    }

    fn reference_fields() -> &'static [ReferenceField] {
        const FIELDS: &[ReferenceField] = &[ReferenceField::single("person_key", "Person")];
        FIELDS
    }

    fn reference_keys(&self, field: &'static str) -> KeyRefs<'_> {
        match field {
            "person_key" => self.person_key.key_refs(),
            _ => KeyRefs::Absent,
        }
    }

    fn attach(&mut self, cache: &ResolutionCache) {
        self.person = self.person_key.get().and_then(|key| cache.get::<Person>(key));
    }

    fn identity_fields() -> &'static [&'static str] {
        &["person_key"]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub key: Option<String>,
    pub name: String,
    #[serde(default)]
    pub member_keys: KeyList<Person>,
    #[serde(skip)]
    pub members: Vec<Arc<Person>>,
}

impl Model for Team {
    const TYPE_NAME: &'static str = "Team";

    fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn set_key(&mut self, key: String) {
        self.key = Some(key);
    }

    fn sort_key(&self) -> String {
        normalized_sort_key(&self.name)
    }

    fn reference_fields() -> &'static [ReferenceField] {
        const FIELDS: &[ReferenceField] = &[ReferenceField::list("member_keys", "Person")];
        FIELDS
    }

    fn reference_keys(&self, field: &'static str) -> KeyRefs<'_> {
        match field {
            "member_keys" => self.member_keys.key_refs(),
            _ => KeyRefs::Absent,
        }
    }

    fn attach(&mut self, cache: &ResolutionCache) {
        self.members = cache.get_all::<Person>(self.member_keys.iter());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    pub key: Option<String>,
    #[serde(default)]
    pub patient_key: Key<Patient>,
    #[serde(skip)]
    pub patient: Option<Arc<Patient>>,
}

impl Model for Visit {
    const TYPE_NAME: &'static str = "Visit";

    fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn set_key(&mut self, key: String) {
        self.key = Some(key);
    }

    fn sort_key(&self) -> String {
        self.key.clone().unwrap_or_default()
    }

    fn reference_fields() -> &'static [ReferenceField] {
        const FIELDS: &[ReferenceField] = &[ReferenceField::single("patient_key", "Patient")];
        FIELDS
    }

    fn reference_keys(&self, field: &'static str) -> KeyRefs<'_> {
        match field {
            "patient_key" => self.patient_key.key_refs(),
            _ => KeyRefs::Absent,
        }
    }

    fn attach(&mut self, cache: &ResolutionCache) {
        self.patient = self.patient_key.get().and_then(|key| cache.get::<Patient>(key));
    }
}

// A two-type reference cycle: Ping -> Pong -> Ping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ping {
    pub key: Option<String>,
    #[serde(default)]
    pub pong_key: Key<Pong>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pong {
    pub key: Option<String>,
    #[serde(default)]
    pub ping_key: Key<Ping>,
}

impl Model for Ping {
    const TYPE_NAME: &'static str = "Ping";

    fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn set_key(&mut self, key: String) {
        self.key = Some(key);
    }

    fn sort_key(&self) -> String {
        self.key.clone().unwrap_or_default()
    }

    fn reference_fields() -> &'static [ReferenceField] {
        const FIELDS: &[ReferenceField] = &[ReferenceField::single("pong_key", "Pong")];
        FIELDS
    }

    fn reference_keys(&self, field: &'static str) -> KeyRefs<'_> {
        match field {
            "pong_key" => self.pong_key.key_refs(),
            _ => KeyRefs::Absent,
        }
    }
}

impl Model for Pong {
    const TYPE_NAME: &'static str = "Pong";

    fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    fn set_key(&mut self, key: String) {
        self.key = Some(key);
    }

    fn sort_key(&self) -> String {
        self.key.clone().unwrap_or_default()
    }

    fn reference_fields() -> &'static [ReferenceField] {
        const FIELDS: &[ReferenceField] = &[ReferenceField::single("ping_key", "Ping")];
        FIELDS
    }

    fn reference_keys(&self, field: &'static str) -> KeyRefs<'_> {
        match field {
            "ping_key" => self.ping_key.key_refs(),
            _ => KeyRefs::Absent,
        }
    }
}

/// Register every fixture model. Idempotent, call at the top of each test.
pub fn register_all() {
    registry::register::<Person>().unwrap();
    registry::register::<Patient>().unwrap();
    registry::register::<Team>().unwrap();
    registry::register::<Visit>().unwrap();
    registry::register::<Ping>().unwrap();
    registry::register::<Pong>().unwrap();
}

pub fn person(key: &str, fname: &str, lname: &str) -> Person {
    Person {
        key: Some(key.to_string()),
        fname: fname.to_string(),
        lname: lname.to_string(),
    }
}

pub fn patient(key: &str, person_key: Option<&str>) -> Patient {
    Patient {
        key: Some(key.to_string()),
        person_key: person_key.map(Key::new).unwrap_or_default(),
        person: None,
    }
}

pub fn team(key: &str, member_keys: &[&str]) -> Team {
    Team {
        key: Some(key.to_string()),
        name: key.to_string(),
        member_keys: member_keys.iter().copied().collect(),
        members: Vec::new(),
    }
}

pub fn raw(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

pub fn person_record(key: &str, fname: &str, lname: &str) -> RawRecord {
    raw(json!({"key": key, "fname": fname, "lname": lname}))
}

pub fn patient_record(key: &str, person_key: Option<&str>) -> RawRecord {
    raw(json!({"key": key, "person_key": person_key}))
}
