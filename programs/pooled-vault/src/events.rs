use anchor_lang::prelude::*;

use crate::state::EpochState;

/// Event emitted when a new vault is initialized
#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub manager: Pubkey,
    pub asset_mint: Pubkey,
    pub share_mint: Pubkey,
    pub max_capacity: u64,
    pub min_capacity: u64,
    pub timestamp: i64,
}

/// Event emitted when assets are deposited during fundraising
#[event]
pub struct Deposited {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub asset_amount: u64,
    pub shares_minted: u64,
    pub total_assets: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

/// Event emitted when assets are withdrawn
#[event]
pub struct Withdrawn {
    pub vault: Pubkey,
    pub user: Pubkey,
    pub receiver: Pubkey,
    pub asset_amount: u64,
    pub withdrawal_fee: u64,
    pub shares_burned: u64,
    pub total_shares: u64,
    pub timestamp: i64,
}

/// Event emitted when the manager takes the vault live
#[event]
pub struct EpochStarted {
    pub vault: Pubkey,
    pub epoch: u64,
    pub start_assets: u64,
    pub timestamp: i64,
}

/// Event emitted when the vault returns to fundraising
#[event]
pub struct ReturnedToFundraising {
    pub vault: Pubkey,
    pub epoch: u64,
    pub total_assets: u64,
    pub timestamp: i64,
}

/// Event emitted when a withdrawal triggers fee realization as a side effect
#[event]
pub struct AutoRealizationTriggered {
    pub vault: Pubkey,
    pub triggered_by: Pubkey,
    pub management_fee: u64,
    pub performance_fee: u64,
    pub protocol_portion: u64,
    pub manager_portion: u64,
    pub new_start_assets: u64,
    pub timestamp: i64,
}

/// Event emitted when the manager realizes fees directly
#[event]
pub struct ProfitRealized {
    pub vault: Pubkey,
    pub epoch: u64,
    pub management_fee: u64,
    pub performance_fee: u64,
    pub protocol_portion: u64,
    pub manager_portion: u64,
    pub new_start_assets: u64,
    pub timestamp: i64,
}

/// Event emitted when a non-underlying asset is registered
#[event]
pub struct SupportedAssetAdded {
    pub vault: Pubkey,
    pub asset_mint: Pubkey,
    pub vault_token_account: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when governance updates the asset whitelist
#[event]
pub struct AssetWhitelistUpdated {
    pub vault: Pubkey,
    pub asset_mint: Pubkey,
    pub asset_type: u8,
    pub enabled: bool,
    pub timestamp: i64,
}

/// Event emitted when governance updates a supported asset's valuation
#[event]
pub struct AssetValuationUpdated {
    pub vault: Pubkey,
    pub asset_mint: Pubkey,
    pub unit_value: u64,
    pub timestamp: i64,
}

/// Event emitted when governance updates the fee schedule
#[event]
pub struct FeesUpdated {
    pub vault: Pubkey,
    pub management_fee_bps: u16,
    pub performance_fee_bps: u16,
    pub withdrawal_fee_bps: u16,
    pub protocol_fee_share_bps: u16,
    pub timestamp: i64,
}

/// Event emitted when the pause overlay is toggled
#[event]
pub struct PauseToggled {
    pub vault: Pubkey,
    pub paused: bool,
    pub authority: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when the manager declares an incident state
#[event]
pub struct VaultStateChanged {
    pub vault: Pubkey,
    pub previous_state: EpochState,
    pub new_state: EpochState,
    pub timestamp: i64,
}
