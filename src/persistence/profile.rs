//! Player profiles, shop purchases and match recording

use serde::{Deserialize, Serialize};

use super::shop::{Accessory, ShopItem, ShopItemId, Skin};
use super::{KeyValueStore, StoreError, load_json, save_json};
use crate::consts::COIN_CONVERSION_RATE;
use crate::engine::{GameOverHandler, MatchReport};
use crate::leaderboard::Leaderboard;

const PROFILE_KEY_PREFIX: &str = "egg_catcher_user_";
const STARTING_COINS: u64 = 100;
const ADMIN_COINS: u64 = 99_999;

/// Per-player progress and wardrobe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub is_admin: bool,
    pub coins: u64,
    pub high_score: u64,
    #[serde(default = "default_skins")]
    pub owned_skins: Vec<Skin>,
    #[serde(default)]
    pub owned_accessories: Vec<Accessory>,
    #[serde(default)]
    pub equipped_skin: Skin,
    #[serde(default)]
    pub equipped_accessories: Vec<Accessory>,
}

fn default_skins() -> Vec<Skin> {
    vec![Skin::Robot]
}

impl PlayerProfile {
    fn fresh(name: &str) -> Self {
        let is_admin = name.eq_ignore_ascii_case("admin");
        let (owned_skins, owned_accessories) = if is_admin {
            (
                vec![Skin::Robot, Skin::Stickman],
                vec![Accessory::TopHat, Accessory::Sunglasses],
            )
        } else {
            (default_skins(), Vec::new())
        };
        Self {
            name: name.to_string(),
            is_admin,
            coins: if is_admin { ADMIN_COINS } else { STARTING_COINS },
            high_score: 0,
            owned_skins,
            owned_accessories,
            equipped_skin: Skin::Robot,
            equipped_accessories: Vec::new(),
        }
    }

    pub fn owns(&self, id: ShopItemId) -> bool {
        match id {
            ShopItemId::Skin(skin) => self.owned_skins.contains(&skin),
            ShopItemId::Accessory(accessory) => self.owned_accessories.contains(&accessory),
        }
    }
}

/// Coins awarded for a final score
pub fn coins_for_score(score: u64) -> u64 {
    score / COIN_CONVERSION_RATE
}

/// Profiles and the leaderboard over one store
#[derive(Debug, Clone)]
pub struct ProfileStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProfileStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn key(name: &str) -> String {
        format!("{}{}", PROFILE_KEY_PREFIX, name)
    }

    pub fn get(&self, name: &str) -> Option<PlayerProfile> {
        load_json(&self.store, &Self::key(name))
    }

    fn put(&mut self, profile: &PlayerProfile) -> Result<(), StoreError> {
        save_json(&mut self.store, &Self::key(&profile.name), profile)
    }

    /// Existing profile, or a new one saved on the spot
    pub fn login_or_register(&mut self, name: &str) -> Result<PlayerProfile, StoreError> {
        if let Some(profile) = self.get(name) {
            return Ok(profile);
        }
        let profile = PlayerProfile::fresh(name);
        self.put(&profile)?;
        log::info!("Registered player '{}' (admin: {})", name, profile.is_admin);
        Ok(profile)
    }

    fn require(&self, name: &str) -> Result<PlayerProfile, StoreError> {
        self.get(name).ok_or_else(|| StoreError::UnknownPlayer {
            name: name.to_string(),
        })
    }

    /// Fold a finished match into the leaderboard and the player's profile.
    ///
    /// The board is written first. If that write fails the profile is untouched.
    pub fn save_progress(&mut self, name: &str, score: u64) -> Result<PlayerProfile, StoreError> {
        let mut profile = self.require(name)?;

        let mut board = self.leaderboard();
        if let Some(rank) = board.add_score(name, score) {
            log::info!("'{}' placed #{} with {}", name, rank, score);
        }
        board.save(&mut self.store)?;

        profile.high_score = profile.high_score.max(score);
        profile.coins += coins_for_score(score);
        self.put(&profile)?;
        Ok(profile)
    }

    /// Buy a shop item with coins. Buying something already owned is free and changes nothing.
    pub fn purchase_item(&mut self, name: &str, id: ShopItemId) -> Result<PlayerProfile, StoreError> {
        let mut profile = self.require(name)?;
        if profile.owns(id) {
            return Ok(profile);
        }

        let item = ShopItem::lookup(id);
        if profile.coins < item.price {
            return Err(StoreError::CannotPurchase {
                item: item.name.to_string(),
                price: item.price,
                coins: profile.coins,
            });
        }
        profile.coins -= item.price;
        match id {
            ShopItemId::Skin(skin) => profile.owned_skins.push(skin),
            ShopItemId::Accessory(accessory) => profile.owned_accessories.push(accessory),
        }
        self.put(&profile)?;
        log::info!("'{}' bought {} for {}", name, item.name, item.price);
        Ok(profile)
    }

    /// Wear an owned skin, or toggle an accessory on or off
    pub fn equip_item(&mut self, name: &str, id: ShopItemId) -> Result<PlayerProfile, StoreError> {
        let mut profile = self.require(name)?;
        let not_owned = || StoreError::NotOwned {
            item: id.as_str().to_string(),
        };

        match id {
            ShopItemId::Skin(skin) => {
                if !profile.owns(id) {
                    return Err(not_owned());
                }
                profile.equipped_skin = skin;
            }
            ShopItemId::Accessory(accessory) => {
                let worn = &mut profile.equipped_accessories;
                if let Some(i) = worn.iter().position(|a| *a == accessory) {
                    worn.remove(i);
                } else if profile.owned_accessories.contains(&accessory) {
                    worn.push(accessory);
                } else {
                    return Err(not_owned());
                }
            }
        }
        self.put(&profile)?;
        Ok(profile)
    }

    pub fn leaderboard(&self) -> Leaderboard {
        Leaderboard::load(&self.store)
    }
}

/// Game-over handler that records each match for one player.
///
/// Storage failures are logged and dropped.
#[derive(Debug)]
pub struct MatchRecorder<S> {
    profiles: ProfileStore<S>,
    player: String,
}

impl<S: KeyValueStore> MatchRecorder<S> {
    pub fn new(profiles: ProfileStore<S>, player: impl Into<String>) -> Self {
        Self {
            profiles,
            player: player.into(),
        }
    }

    pub fn profiles(&self) -> &ProfileStore<S> {
        &self.profiles
    }

    pub fn into_profiles(self) -> ProfileStore<S> {
        self.profiles
    }
}

impl<S: KeyValueStore> GameOverHandler for MatchRecorder<S> {
    fn on_game_over(&mut self, report: &MatchReport) {
        match self.profiles.save_progress(&self.player, report.score) {
            Ok(profile) => log::info!(
                "Saved progress for '{}': best {}, coins {}",
                profile.name,
                profile.high_score,
                profile.coins
            ),
            Err(e) => log::warn!("Could not save progress for '{}': {}", self.player, e),
        }
    }
}
