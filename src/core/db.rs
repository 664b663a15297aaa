use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use spin_sdk::key_value::Store;

use crate::config::*;
use crate::models::park::{Park, ParkInput};
use crate::models::user::User;

/// Byte-level key/value backend the collections are built on.
///
/// Individual operations are atomic; sequences of them are not.
pub trait KvStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> anyhow::Result<()>;
    fn delete(&self, key: &str) -> anyhow::Result<()>;

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        match self.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        self.set(key, &serde_json::to_vec(value)?)
    }
}

impl KvStore for Store {
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(Store::get(self, key)?)
    }

    fn set(&self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        Ok(Store::set(self, key, value)?)
    }

    fn delete(&self, key: &str) -> anyhow::Result<()> {
        Ok(Store::delete(self, key)?)
    }
}

/// Process-local store used by the native server and the tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> anyhow::Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<u8>>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        self.entries()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// A document collection: `kind:{id}` entries plus an ordered id list.
pub struct Collection {
    list_key: &'static str,
    doc_key: fn(&str) -> String,
}

pub const PARKS: Collection = Collection {
    list_key: PARKS_LIST_KEY,
    doc_key: park_key,
};

pub const USERS: Collection = Collection {
    list_key: USERS_LIST_KEY,
    doc_key: user_key,
};

impl Collection {
    pub fn ids(&self, store: &impl KvStore) -> anyhow::Result<Vec<String>> {
        Ok(store.get_json(self.list_key)?.unwrap_or_default())
    }

    pub fn find_all<T: DeserializeOwned>(&self, store: &impl KvStore) -> anyhow::Result<Vec<T>> {
        let mut docs = Vec::new();
        for id in self.ids(store)? {
            // Skip ids whose document vanished between the two reads
            if let Some(doc) = store.get_json(&(self.doc_key)(&id))? {
                docs.push(doc);
            }
        }
        Ok(docs)
    }

    pub fn find_by_id<T: DeserializeOwned>(
        &self,
        store: &impl KvStore,
        id: &str,
    ) -> anyhow::Result<Option<T>> {
        store.get_json(&(self.doc_key)(id))
    }

    pub fn insert<T: Serialize>(&self, store: &impl KvStore, id: &str, doc: &T) -> anyhow::Result<()> {
        store.set_json(&(self.doc_key)(id), doc)?;

        let mut ids = self.ids(store)?;
        ids.push(id.to_string());
        store.set_json(self.list_key, &ids)
    }

    pub fn save<T: Serialize>(&self, store: &impl KvStore, id: &str, doc: &T) -> anyhow::Result<()> {
        store.set_json(&(self.doc_key)(id), doc)
    }

    pub fn remove(&self, store: &impl KvStore, id: &str) -> anyhow::Result<()> {
        store.delete(&(self.doc_key)(id))?;

        let mut ids = self.ids(store)?;
        ids.retain(|existing| existing != id);
        store.set_json(self.list_key, &ids)
    }
}

fn sample_parks() -> Vec<ParkInput> {
    let park = |fields: [&str; 7]| {
        let [name, image, location, established, area, visitors, description] =
            fields.map(|f| Some(f.to_string()));
        ParkInput {
            name,
            image,
            location,
            established,
            area,
            rec_visitors: visitors,
            description,
        }
    };

    vec![
        park([
            "Yellowstone",
            "https://www.nps.gov/common/uploads/structured_data/yell.jpg",
            "Wyoming, Montana, Idaho",
            "March 1, 1872",
            "2,219,790.71 acres",
            "4,860,242",
            "Situated on the Yellowstone Caldera, the park has an expansive network of geothermal areas.",
        ]),
        park([
            "Yosemite",
            "https://www.nps.gov/common/uploads/structured_data/yose.jpg",
            "California",
            "October 1, 1890",
            "761,747.50 acres",
            "3,667,550",
            "Yosemite features sheer granite cliffs, exceptionally tall waterfalls, and old-growth forests.",
        ]),
        park([
            "Zion",
            "https://www.nps.gov/common/uploads/structured_data/zion.jpg",
            "Utah",
            "November 19, 1919",
            "147,242.66 acres",
            "4,692,417",
            "Located at the junction of the Colorado Plateau, Great Basin, and Mojave Desert.",
        ]),
    ]
}

/// Inserts a few sample parks into an empty park collection.
pub fn seed_parks(store: &impl KvStore) -> anyhow::Result<usize> {
    if !PARKS.ids(store)?.is_empty() {
        return Ok(0); // Already seeded
    }

    let mut inserted = 0;
    for input in sample_parks() {
        let park = Park::create(input)?;
        PARKS.insert(store, &park.id, &park)?;
        inserted += 1;
    }

    tracing::info!(count = inserted, "seeded sample parks");
    Ok(inserted)
}

pub fn reset_store(store: &impl KvStore) -> anyhow::Result<()> {
    for id in PARKS.ids(store)? {
        store.delete(&park_key(&id))?;
    }

    for user in USERS.find_all::<User>(store)? {
        store.delete(&nickname_key(&user.nickname))?;
        store.delete(&user_key(&user.id))?;
    }

    store.delete(PARKS_LIST_KEY)?;
    store.delete(USERS_LIST_KEY)?;

    Ok(())
}
