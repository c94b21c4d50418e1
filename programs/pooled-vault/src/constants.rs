// Constants for the Pooled Vault program

/// Seed for vault state PDA
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for share mint PDA
pub const SHARE_MINT_SEED: &[u8] = b"shares";

/// Seed for vault authority PDA
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

/// Seed for the supported-asset registry PDA
pub const SUPPORTED_ASSETS_SEED: &[u8] = b"supported_assets";

/// Seed for the asset whitelist PDA
pub const ASSET_WHITELIST_SEED: &[u8] = b"asset_whitelist";

/// Basis-point denominator (100% == 10_000 bps)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Annualization denominator for management fee accrual (365 days)
pub const SECONDS_PER_YEAR: i64 = 31_536_000;

/// Minimum time between two fee realizations
pub const REALIZATION_COOLDOWN_SECONDS: i64 = 3_600;

/// Scale for supported-asset valuations: `unit_value` is the underlying
/// value of VALUE_SCALE raw units of the asset
pub const VALUE_SCALE: u64 = 1_000_000;

/// Fee caps enforced at the governance/factory boundary.
/// The stored fields are u16 bps; these keep authorized updates sane.
pub const MAX_MANAGEMENT_FEE_BPS: u16 = 1_000;
pub const MAX_PERFORMANCE_FEE_BPS: u16 = 5_000;
pub const MAX_WITHDRAWAL_FEE_BPS: u16 = 500;
pub const MAX_PROTOCOL_FEE_SHARE_BPS: u16 = 10_000;

/// Space for VaultState account (8 discriminator + 5 * 32 pubkeys +
/// 8 total_shares + 1 epoch_state + 1 paused + 8 current_epoch +
/// 8 start_assets + 8 last_management_fee_timestamp + 1 is_profit_realized +
/// 8 last_realization_timestamp + 8 min_capacity + 8 max_capacity +
/// 8 min_deposit + 4 * 2 fee bps + 3 bumps + 128 padding)
pub const VAULT_STATE_SIZE: usize =
    8 + (5 * 32) + 8 + 1 + 1 + 8 + 8 + 8 + 1 + 8 + 8 + 8 + 8 + (4 * 2) + 3 + 128;
