mod ledger;
mod merkle;
mod settler;
mod submission;
mod wallet;

pub use ledger::LedgerClient;
pub use ledger::NoopLedger;
pub use merkle::leaf_hash;
pub use merkle::merkle_root;
pub use merkle::ZERO_HASH;
pub use settler::BatchSettler;
pub use settler::SettlementConfig;
pub use submission::SettlementSubmission;
pub use wallet::NoWallets;
pub use wallet::WalletResolver;
