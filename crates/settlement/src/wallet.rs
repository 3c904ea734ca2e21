/// Resolves an internal playerId to a registered wallet address.
/// Bots and unregistered agents resolve to `None` and are omitted from
/// the chip-delta roll-up, per §4.9.
pub trait WalletResolver: Send + Sync {
    fn resolve(&self, player_id: &str) -> Option<String>;
}

/// Resolver used when no external wallet registry is wired up: every
/// player maps to nothing, so the whole batch's chip-delta roll-up is
/// empty but the Merkle root and per-hand data are still produced.
pub struct NoWallets;

impl WalletResolver for NoWallets {
    fn resolve(&self, _player_id: &str) -> Option<String> {
        None
    }
}
