use std::{collections::HashSet, sync::Arc};

use tracing::{error, info};

use crate::{
    entities::word_bank::{default_bank, WordBank},
    interfaces::snapshot_storage::SnapshotStorage,
    middleware::error::{AppError, AppResult},
    utils::normalize::normalize,
};

pub type WordBankStorage = Arc<dyn SnapshotStorage<WordBank> + Send + Sync>;

/// Categorised word lists with case/whitespace-insensitive uniqueness per category.
///
/// Every mutation is staged on a copy of the bank and committed only after the
/// snapshot has been written, so a failed write never leaves memory ahead of disk.
pub struct WordStore {
    bank: WordBank,
    storage: WordBankStorage,
}

impl WordStore {
    /// Loads the snapshot, seeding the default bank when none exists, then drops
    /// entries that duplicate an earlier word of the same category.
    pub fn load(storage: WordBankStorage) -> AppResult<Self> {
        let mut store = match storage.load()? {
            Some(bank) => {
                info!("->> loaded word bank with {} categories", bank.len());
                Self { bank, storage }
            }
            None => {
                let bank = default_bank();
                storage.save(&bank)?;
                info!("->> no word bank snapshot found, seeded defaults");
                Self { bank, storage }
            }
        };
        store.dedup()?;
        Ok(store)
    }

    pub fn list_all(&self) -> WordBank {
        self.bank.clone()
    }

    pub fn get(&self, category: &str) -> AppResult<&[String]> {
        self.bank
            .get(category)
            .map(Vec::as_slice)
            .ok_or_else(hobby_not_found)
    }

    pub fn insert(&mut self, category: &str, word: &str) -> AppResult<&[String]> {
        let key = normalize(word);
        if key.is_empty() {
            return Err(blank_word("word"));
        }

        let mut words = self.bank.get(category).cloned().unwrap_or_default();
        if words.iter().any(|w| normalize(w) == key) {
            return Err(AppError::Conflict {
                word: word.to_string(),
            });
        }
        words.push(word.to_string());

        self.commit_category(category, words)?;
        info!("->> added '{word}' to {category}");
        self.get(category)
    }

    /// Removes the first entry matching `word` by comparison key.
    pub fn remove(&mut self, category: &str, word: &str) -> AppResult<(String, &[String])> {
        let mut words = self.get(category)?.to_vec();
        let key = normalize(word);
        let index = words
            .iter()
            .position(|w| normalize(w) == key)
            .ok_or_else(word_not_found)?;
        let deleted = words.remove(index);

        self.commit_category(category, words)?;
        info!("->> deleted '{deleted}' from {category}");
        Ok((deleted, self.get(category)?))
    }

    /// Replaces the entry matching `old_word` in place and returns the replaced raw entry.
    pub fn update(
        &mut self,
        category: &str,
        old_word: &str,
        new_word: &str,
    ) -> AppResult<(String, &[String])> {
        let old_key = normalize(old_word);
        let new_key = normalize(new_word);
        if old_key.is_empty() {
            return Err(blank_word("oldWord"));
        }
        if new_key.is_empty() {
            return Err(blank_word("newWord"));
        }

        let mut words = self.get(category)?.to_vec();
        let index = words
            .iter()
            .position(|w| normalize(w) == old_key)
            .ok_or_else(word_not_found)?;
        let clash = words
            .iter()
            .enumerate()
            .any(|(i, w)| i != index && normalize(w) == new_key);
        if clash {
            return Err(AppError::Conflict {
                word: new_word.to_string(),
            });
        }
        let replaced = std::mem::replace(&mut words[index], new_word.to_string());

        self.commit_category(category, words)?;
        info!("->> updated '{replaced}' to '{new_word}' in {category}");
        Ok((replaced, self.get(category)?))
    }

    pub fn reset(&mut self) -> AppResult<&WordBank> {
        self.commit(default_bank())?;
        info!("->> word bank reset to defaults");
        Ok(&self.bank)
    }

    /// Keeps the first of any entries sharing a comparison key; persists only when
    /// something was dropped.
    pub fn dedup(&mut self) -> AppResult<usize> {
        let mut next = self.bank.clone();
        let mut removed = 0;
        for (category, words) in next.iter_mut() {
            let mut seen = HashSet::new();
            let before = words.len();
            words.retain(|w| seen.insert(normalize(w)));
            if words.len() < before {
                info!("->> dropped {} duplicate(s) from {category}", before - words.len());
                removed += before - words.len();
            }
        }
        if removed > 0 {
            self.commit(next)?;
        }
        Ok(removed)
    }

    fn commit_category(&mut self, category: &str, words: Vec<String>) -> AppResult<()> {
        let mut next = self.bank.clone();
        next.insert(category.to_string(), words);
        self.commit(next)
    }

    fn commit(&mut self, next: WordBank) -> AppResult<()> {
        self.storage.save(&next).inspect_err(|e| {
            error!("->> word bank snapshot write failed, change discarded: {e:?}")
        })?;
        self.bank = next;
        Ok(())
    }
}

fn hobby_not_found() -> AppError {
    AppError::NotFound {
        ident: "Hobby".to_string(),
    }
}

fn word_not_found() -> AppError {
    AppError::NotFound {
        ident: "Word".to_string(),
    }
}

fn blank_word(field: &str) -> AppError {
    AppError::Validation {
        description: format!("{field} must not be blank"),
    }
}
