use serde::{Deserialize, Serialize};

/// The defender's purse and remaining base health.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    health: u32,
    money: u32,
}

impl Player {
    /// Creates a player with the provided starting health and money.
    #[must_use]
    pub const fn new(health: u32, money: u32) -> Self {
        Self { health, money }
    }

    /// Remaining base health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Money available for purchases.
    #[must_use]
    pub const fn money(&self) -> u32 {
        self.money
    }

    /// Reports whether `cost` can be paid.
    #[must_use]
    pub const fn can_afford(&self, cost: u32) -> bool {
        self.money >= cost
    }

    /// Pays `cost`, returning `false` without charging when funds are short.
    pub fn spend(&mut self, cost: u32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.money -= cost;
        true
    }

    /// Adds `amount` to the purse.
    pub fn earn(&mut self, amount: u32) {
        self.money = self.money.saturating_add(amount);
    }

    /// Subtracts `damage` from the base health, flooring at zero.
    pub fn take_damage(&mut self, damage: u32) {
        self.health = self.health.saturating_sub(damage);
    }

    /// Reports whether the base has fallen.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.health == 0
    }
}
