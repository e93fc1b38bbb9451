//! Shared tournaments: short public ids, PIN-gated writes, expiry after a TTL.
//!
//! Anyone with the id may read a tournament and use the kiosk patch (toggle or
//! add a player). Everything else needs the PIN handed out at creation.

use crate::models::{Player, PlayerId, Tournament, TournamentError};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Hours a shared tournament lives after creation.
pub const DEFAULT_TTL_HOURS: i64 = 24;

const ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ID_LEN: usize = 6;

/// Errors from the share store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ShareError {
    /// Unknown or expired id.
    NotFound,
    /// Write attempted without a PIN.
    PinRequired,
    /// PIN does not match.
    InvalidPin,
    /// The change was rejected by the tournament itself.
    Tournament(TournamentError),
}

impl std::fmt::Display for ShareError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShareError::NotFound => write!(f, "Tournament not found"),
            ShareError::PinRequired => write!(f, "PIN is required"),
            ShareError::InvalidPin => write!(f, "Invalid PIN"),
            ShareError::Tournament(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ShareError {}

impl From<TournamentError> for ShareError {
    fn from(e: TournamentError) -> Self {
        ShareError::Tournament(e)
    }
}

/// 32-bit rolling string hash (`h * 31 + c`), as signed lowercase hex.
///
/// Only keeps PINs out of plain sight in the store; it is not a password hash.
pub fn hash_pin(pin: &str) -> String {
    let h = pin
        .encode_utf16()
        .fold(0i32, |h, c| h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(c)));
    if h < 0 {
        format!("-{:x}", i64::from(h).unsigned_abs())
    } else {
        format!("{:x}", h)
    }
}

/// Random 6-character `[a-z0-9]` id.
pub fn generate_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ID_LEN)
        .map(|_| char::from(ID_CHARS[rng.gen_range(0..ID_CHARS.len())]))
        .collect()
}

/// Random 4-digit PIN (1000-9999).
pub fn generate_pin<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(1000..10000).to_string()
}

/// A stored tournament with its PIN hash and lifetime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SharedTournament {
    pub id: String,
    pub pin_hash: String,
    pub tournament: Tournament,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SharedTournament {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn view(&self) -> SharedView {
        SharedView {
            id: self.id.clone(),
            tournament: self.tournament.clone(),
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}

/// Public view of a shared tournament (no PIN hash).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SharedView {
    pub id: String,
    pub tournament: Tournament,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Returned once, at creation: the only time the PIN is visible.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatedShare {
    pub id: String,
    pub pin: String,
    pub share_url: String,
}

/// Kiosk change that needs no PIN.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlayerPatch {
    Toggle { player_id: PlayerId },
    Add { player: Player },
}

/// In-memory store of shared tournaments by id.
#[derive(Debug)]
pub struct ShareStore {
    entries: HashMap<String, SharedTournament>,
    ttl: Duration,
}

impl Default for ShareStore {
    fn default() -> Self {
        Self::new(Duration::hours(DEFAULT_TTL_HOURS))
    }
}

impl ShareStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store a tournament under a fresh id and PIN.
    pub fn create<R: Rng + ?Sized>(
        &mut self,
        tournament: Tournament,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> CreatedShare {
        let mut id = generate_id(rng);
        while self.entries.contains_key(&id) {
            id = generate_id(rng);
        }
        let pin = generate_pin(rng);
        self.entries.insert(
            id.clone(),
            SharedTournament {
                id: id.clone(),
                pin_hash: hash_pin(&pin),
                tournament,
                created_at: now,
                expires_at: now + self.ttl,
            },
        );
        CreatedShare {
            share_url: format!("/game/{}", id),
            id,
            pin,
        }
    }

    /// Read access; expired entries count as missing.
    pub fn get(&self, id: &str, now: DateTime<Utc>) -> Result<&SharedTournament, ShareError> {
        self.entries
            .get(id)
            .filter(|e| !e.is_expired(now))
            .ok_or(ShareError::NotFound)
    }

    fn get_mut(
        &mut self,
        id: &str,
        now: DateTime<Utc>,
    ) -> Result<&mut SharedTournament, ShareError> {
        self.entries
            .get_mut(id)
            .filter(|e| !e.is_expired(now))
            .ok_or(ShareError::NotFound)
    }

    fn authorize(
        &mut self,
        id: &str,
        pin: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<&mut SharedTournament, ShareError> {
        let pin = pin.ok_or(ShareError::PinRequired)?;
        let entry = self.get_mut(id, now)?;
        if hash_pin(pin) != entry.pin_hash {
            return Err(ShareError::InvalidPin);
        }
        Ok(entry)
    }

    /// Replace the stored tournament. The expiry does not move.
    pub fn update(
        &mut self,
        id: &str,
        pin: Option<&str>,
        tournament: Tournament,
        now: DateTime<Utc>,
    ) -> Result<&SharedTournament, ShareError> {
        let entry = self.authorize(id, pin, now)?;
        entry.tournament = tournament;
        Ok(&*entry)
    }

    pub fn delete(
        &mut self,
        id: &str,
        pin: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<(), ShareError> {
        self.authorize(id, pin, now)?;
        self.entries.remove(id);
        Ok(())
    }

    /// Run a PIN-gated change against the stored tournament.
    pub fn with_tournament_mut<T>(
        &mut self,
        id: &str,
        pin: Option<&str>,
        now: DateTime<Utc>,
        f: impl FnOnce(&mut Tournament) -> Result<T, TournamentError>,
    ) -> Result<T, ShareError> {
        let entry = self.authorize(id, pin, now)?;
        Ok(f(&mut entry.tournament)?)
    }

    /// Kiosk change: toggle a player's active flag or add a walk-in player.
    pub fn patch_players(
        &mut self,
        id: &str,
        patch: PlayerPatch,
        now: DateTime<Utc>,
    ) -> Result<&Tournament, ShareError> {
        let entry = self.get_mut(id, now)?;
        match patch {
            PlayerPatch::Toggle { player_id } => {
                entry.tournament.toggle_active(player_id)?;
            }
            PlayerPatch::Add { mut player } => {
                player.is_active.get_or_insert(true);
                entry.tournament.add_player(player)?;
            }
        }
        Ok(&entry.tournament)
    }

    /// Drop expired entries; returns how many were removed.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| !e.is_expired(now));
        before - self.entries.len()
    }
}
