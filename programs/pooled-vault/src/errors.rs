use anchor_lang::prelude::*;

/// Custom error codes for the Pooled Vault program
///
/// Security: Descriptive error messages without information leakage
#[error_code]
pub enum VaultError {
    #[msg("Operation not permitted in the current vault state")]
    InvalidVaultState,

    #[msg("Only the vault manager can perform this action")]
    OnlyManager,

    #[msg("Only the governance authority can perform this action")]
    OnlyGovernance,

    #[msg("Vault is paused")]
    VaultPaused,

    #[msg("Vault is not paused")]
    VaultNotPaused,

    #[msg("Deposit amount is below the vault minimum")]
    BelowMinimumDeposit,

    #[msg("Deposit would exceed the vault's maximum capacity")]
    MaxCapacityExceeded,

    #[msg("Minimum capacity cannot exceed maximum capacity")]
    InvalidCapacityBounds,

    #[msg("Vault has not reached minimum capacity to go live")]
    CannotGoLive,

    #[msg("Vault does not hold enough underlying assets for this withdrawal")]
    InsufficientUnderlyingAssets,

    #[msg("Owner does not hold enough shares for this withdrawal")]
    InsufficientShares,

    #[msg("All positions must be liquidated before fees can be realized")]
    ManualLiquidationRequired,

    #[msg("All positions must be liquidated before returning to fundraising")]
    MustLiquidateAllPositions,

    #[msg("Management fee exceeds the maximum allowed")]
    ManagementFeeExceedsMax,

    #[msg("Performance fee exceeds the maximum allowed")]
    PerformanceFeeExceedsMax,

    #[msg("Withdrawal fee exceeds the maximum allowed")]
    WithdrawalFeeExceedsMax,

    #[msg("Protocol fee share exceeds the maximum allowed")]
    ProtocolFeeShareExceedsMax,

    #[msg("Asset is not on the governance whitelist")]
    AssetNotWhitelisted,

    #[msg("Asset is already in the supported-asset registry")]
    AssetAlreadySupported,

    #[msg("Asset is not in the supported-asset registry")]
    AssetNotSupported,

    #[msg("Supported-asset registry is full")]
    RegistryFull,

    #[msg("Asset whitelist is full")]
    WhitelistFull,

    #[msg("A supported asset's vault token account was not supplied")]
    MissingSupportedAssetAccount,

    #[msg("Invalid token mint - does not match vault asset")]
    InvalidMint,

    #[msg("Invalid token account owner")]
    InvalidOwner,

    #[msg("Math overflow occurred during calculation")]
    MathOverflow,

    #[msg("Cannot divide by zero - vault has no shares")]
    DivisionByZero,
}
