//! Section id generation.
//!
//! Ids only need to be unique within a session; the store re-draws on collision,
//! so generators are free to be short and cheap.

use crate::model::SectionId;
use std::fmt;
use uuid::Uuid;

const ID_PREFIX: &str = "sec_";
const RANDOM_LEN: usize = 10;

pub trait IdGenerator: fmt::Debug {
    fn next_id(&mut self) -> SectionId;
}

/// Short random ids (`sec_` followed by ten hex digits of a v4 uuid).
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> SectionId {
        let token = Uuid::new_v4().simple().to_string();
        SectionId::new(format!("{}{}", ID_PREFIX, &token[..RANDOM_LEN]))
    }
}

/// Deterministic ids: `sec_1`, `sec_2`, ...
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> SectionId {
        self.next += 1;
        SectionId::new(format!("{}{}", ID_PREFIX, self.next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_have_prefix_and_length() {
        let id = RandomIds.next_id();
        assert!(id.as_str().starts_with("sec_"));
        assert_eq!(id.as_str().len(), ID_PREFIX.len() + RANDOM_LEN);
    }

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id().as_str(), "sec_1");
        assert_eq!(ids.next_id().as_str(), "sec_2");
    }
}
