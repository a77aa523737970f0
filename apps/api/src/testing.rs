//! In-memory stand-ins for the external collaborators, shared by unit tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::attendance::store::{AttendanceStore, StoreError};
use crate::face_client::{EmotionClassifier, FaceServiceError, FaceVerifier, Verification};
use crate::models::attendance::AttendanceRecord;
use crate::models::resume::EntitySpan;
use crate::ner_client::{EntityRecognizer, NerError};

fn service_down() -> FaceServiceError {
    FaceServiceError::Api {
        status: 503,
        message: "face service unavailable".to_string(),
    }
}

pub struct FakeVerifier {
    result: Option<bool>,
    calls: AtomicUsize,
}

impl FakeVerifier {
    pub fn new(verified: bool) -> Self {
        Self {
            result: Some(verified),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FaceVerifier for FakeVerifier {
    async fn verify(
        &self,
        _capture_jpeg: &[u8],
        _reference: &Path,
    ) -> Result<Verification, FaceServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let verified = self.result.ok_or_else(service_down)?;
        Ok(Verification {
            verified,
            distance: Some(if verified { 0.2 } else { 0.9 }),
            threshold: Some(0.4),
        })
    }
}

pub struct FakeEmotions {
    emotion: String,
    calls: AtomicUsize,
}

impl FakeEmotions {
    pub fn new(emotion: &str) -> Self {
        Self {
            emotion: emotion.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmotionClassifier for FakeEmotions {
    async fn dominant_emotion(&self, _jpeg: &[u8]) -> Result<String, FaceServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.emotion.clone())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<AttendanceRecord>>,
    broken: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            records: Mutex::default(),
            broken: true,
        }
    }

    pub fn records(&self) -> Vec<AttendanceRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn insert(&self, record: &AttendanceRecord) -> Result<(), StoreError> {
        if self.broken {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn find_by_user_name(
        &self,
        user_name: &str,
    ) -> Result<Vec<AttendanceRecord>, StoreError> {
        if self.broken {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_name == user_name)
            .cloned()
            .collect())
    }
}

pub struct FakeRecognizer {
    entities: Option<Vec<EntitySpan>>,
    calls: AtomicUsize,
}

impl FakeRecognizer {
    pub fn new(entities: Vec<EntitySpan>) -> Self {
        Self {
            entities: Some(entities),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            entities: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntityRecognizer for FakeRecognizer {
    async fn recognize(&self, _text: &str) -> Result<Vec<EntitySpan>, NerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.entities.clone().ok_or(NerError::Api {
            status: 500,
            message: "model not loaded".to_string(),
        })
    }
}
