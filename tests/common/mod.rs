//! Shared models and store seeding for the integration tests.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use refbase::{
    normalized_sort_key, Key, KeyList, KeyRefs, MemoryStore, Model, RawRecord, ReferenceField,
    ResolutionCache,
};

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

/// Register the shared models. Idempotent, call at the top of each test.
pub fn register_models() {
    refbase::register::<Person>().unwrap();
    refbase::register::<Patient>().unwrap();
    refbase::register::<Team>().unwrap();
}

pub fn raw(value: serde_json::Value) -> RawRecord {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

/// Two people and two patients, each patient referencing one person.
pub fn clinic_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.seed(
        "Person",
        [
            raw(json!({"key": "p1", "fname": "Maria", "lname": "Ortiz"})),
            raw(json!({"key": "p2", "fname": "Nuno", "lname": "Abad"})),
        ],
    );
    store.seed(
        "Patient",
        [
            raw(json!({"key": "t1", "person_key": "p1"})),
            raw(json!({"key": "t2", "person_key": "p2"})),
        ],
    );
    store
}
