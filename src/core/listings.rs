use crate::domain::model::{Listing, NewListing};
use crate::domain::ports::KeyValueStore;
use crate::utils::error::{KisanError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive_amount};
use chrono::Utc;
use uuid::Uuid;

pub const LISTINGS_KEY: &str = "listings";

/// Ordered produce listings, written back to the store on every change.
///
/// Loading never fails: a missing or unreadable record starts an empty board.
/// Write failures are logged and the in-memory collection stays authoritative.
pub struct ListingStore<S: KeyValueStore> {
    store: S,
    key: String,
    listings: Vec<Listing>,
}

impl<S: KeyValueStore> ListingStore<S> {
    pub fn load(store: S, namespace: &str) -> Self {
        let key = format!("{}.{}", namespace, LISTINGS_KEY);
        let listings = read_listings(&store, &key);
        tracing::debug!("Loaded {} listings from {}", listings.len(), key);
        Self {
            store,
            key,
            listings,
        }
    }

    pub fn add(&mut self, fields: NewListing) -> Result<Listing> {
        validate_listing(&fields)?;

        let listing = Listing {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            crop: fields.crop,
            quantity: fields.quantity,
            price_per_unit: fields.price_per_unit,
            location: fields.location,
            contact: fields.contact,
        };

        self.listings.push(listing.clone());
        self.persist();
        tracing::info!("Added listing {} for {}", listing.id, listing.crop);
        Ok(listing)
    }

    /// Returns whether an entry was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.listings.len();
        self.listings.retain(|listing| listing.id != id);
        let removed = self.listings.len() != before;

        self.persist();
        if removed {
            tracing::info!("Removed listing {}", id);
        } else {
            tracing::debug!("No listing with id {}", id);
        }
        removed
    }

    pub fn list(&self) -> &[Listing] {
        &self.listings
    }

    pub fn find_by_crop(&self, crop: &str) -> Vec<&Listing> {
        let wanted = crop.trim();
        self.listings
            .iter()
            .filter(|listing| listing.crop.trim().eq_ignore_ascii_case(wanted))
            .collect()
    }

    fn persist(&self) {
        let outcome = serde_json::to_string(&self.listings)
            .map_err(KisanError::from)
            .and_then(|json| self.store.set(&self.key, &json));

        if let Err(e) = outcome {
            tracing::warn!("Could not persist listings to {}: {}", self.key, e);
        }
    }
}

fn validate_listing(fields: &NewListing) -> Result<()> {
    validate_non_empty_string("crop", &fields.crop)?;
    validate_positive_amount("quantity", fields.quantity)?;
    validate_positive_amount("price_per_unit", fields.price_per_unit)?;
    validate_non_empty_string("location", &fields.location)?;
    validate_non_empty_string("contact", &fields.contact)?;
    Ok(())
}

fn read_listings<S: KeyValueStore>(store: &S, key: &str) -> Vec<Listing> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Could not read {}: {}", key, e);
            return Vec::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(listings) => listings,
        Err(e) => {
            tracing::warn!("Discarding corrupt listings record {}: {}", key, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::utils::error::Result as KisanResult;
    use std::sync::Arc;

    fn wheat() -> NewListing {
        NewListing {
            crop: "Wheat".to_string(),
            quantity: 40.0,
            price_per_unit: 2275.0,
            location: "Karnal".to_string(),
            contact: "+91 98765 43210".to_string(),
        }
    }

    #[test]
    fn test_add_list_remove_round_trip() {
        let mut board = ListingStore::load(MemoryStore::new(), "kisan");
        let fields = wheat();

        let added = board.add(fields.clone()).unwrap();
        assert_eq!(board.list().len(), 1);
        assert!(board.list()[0].matches(&fields));
        assert_eq!(board.list()[0].id, added.id);

        assert!(board.remove(&added.id));
        assert!(board.list().is_empty());
    }

    #[test]
    fn test_submitted_fields_are_stored_verbatim() {
        let mut board = ListingStore::load(MemoryStore::new(), "kisan");
        let fields = NewListing {
            crop: " Basmati Rice ".to_string(),
            location: "Amritsar\n".to_string(),
            ..wheat()
        };

        board.add(fields.clone()).unwrap();
        assert!(board.list()[0].matches(&fields));
        assert_eq!(board.list()[0].crop, " Basmati Rice ");
        assert_eq!(board.find_by_crop("basmati rice").len(), 1);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut board = ListingStore::load(MemoryStore::new(), "kisan");
        for crop in ["Wheat", "Rice", "Maize"] {
            board
                .add(NewListing {
                    crop: crop.to_string(),
                    ..wheat()
                })
                .unwrap();
        }
        let crops: Vec<&str> = board.list().iter().map(|l| l.crop.as_str()).collect();
        assert_eq!(crops, vec!["Wheat", "Rice", "Maize"]);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut board = ListingStore::load(MemoryStore::new(), "kisan");
        let a = board.add(wheat()).unwrap();
        let b = board.add(wheat()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut board = ListingStore::load(MemoryStore::new(), "kisan");
        board.add(wheat()).unwrap();
        assert!(!board.remove("does-not-exist"));
        assert_eq!(board.list().len(), 1);
    }

    #[test]
    fn test_empty_required_fields_are_reported() {
        let mut board = ListingStore::load(MemoryStore::new(), "kisan");
        for (field, fields) in [
            ("crop", NewListing { crop: "  ".to_string(), ..wheat() }),
            ("location", NewListing { location: String::new(), ..wheat() }),
            ("contact", NewListing { contact: "\t".to_string(), ..wheat() }),
            ("quantity", NewListing { quantity: 0.0, ..wheat() }),
            ("price_per_unit", NewListing { price_per_unit: -1.0, ..wheat() }),
        ] {
            let err = board.add(fields).unwrap_err();
            assert!(
                matches!(err, KisanError::ValidationError { field: ref f, .. } if f == field),
                "expected validation error on {}, got {:?}",
                field,
                err
            );
        }
        assert!(board.list().is_empty());
    }

    #[test]
    fn test_reload_preserves_order_and_values() {
        let store = Arc::new(MemoryStore::new());
        let mut board = ListingStore::load(store.clone(), "kisan");
        board.add(wheat()).unwrap();
        board
            .add(NewListing {
                crop: "Cotton".to_string(),
                ..wheat()
            })
            .unwrap();
        let original = board.list().to_vec();

        let reloaded = ListingStore::load(store, "kisan");
        assert_eq!(reloaded.list(), original.as_slice());
    }

    #[test]
    fn test_corrupt_record_loads_empty() {
        let store = MemoryStore::new();
        store.set("kisan.listings", "{not json").unwrap();
        let board = ListingStore::load(store, "kisan");
        assert!(board.list().is_empty());
    }

    #[test]
    fn test_find_by_crop_is_case_insensitive() {
        let mut board = ListingStore::load(MemoryStore::new(), "kisan");
        board.add(wheat()).unwrap();
        board
            .add(NewListing {
                crop: "Rice".to_string(),
                ..wheat()
            })
            .unwrap();
        assert_eq!(board.find_by_crop("wheat").len(), 1);
        assert_eq!(board.find_by_crop("BARLEY").len(), 0);
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> KisanResult<Option<String>> {
            Err(KisanError::StorageError {
                message: "quota exceeded".to_string(),
            })
        }

        fn set(&self, _key: &str, _value: &str) -> KisanResult<()> {
            Err(KisanError::StorageError {
                message: "quota exceeded".to_string(),
            })
        }

        fn remove(&self, _key: &str) -> KisanResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_storage_failures_fall_back_to_memory() {
        let mut board = ListingStore::load(FailingStore, "kisan");
        assert!(board.list().is_empty());

        let added = board.add(wheat()).unwrap();
        assert_eq!(board.list().len(), 1);
        assert!(board.remove(&added.id));
    }
}
