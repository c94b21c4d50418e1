// Pooled Vault - multi-tenant pooled-capital vault on Solana
// Lifecycle: FUNDRAISING -> LIVE -> {FUNDRAISING, EMERGENCY, LIQUIDATING, FROZEN}
// Fee realization is gated by a liquidation guard so performance fees are only
// ever crystallized on cash gains in the underlying asset.

use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;
use state::EpochState;

declare_id!("BuMNP96FGKW4p2oNQs8edrwrM9zHELcyMiHRjqCMm8Y2");

#[program]
pub mod pooled_vault {
    use super::*;

    /// Initialize a new vault for a given underlying asset
    ///
    /// Security considerations:
    /// - Fee schedule validated against the governance caps
    /// - Share mint authority is a program PDA
    /// - Supported-asset registry created empty alongside the vault
    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        instructions::initialize::handler(ctx, params)
    }

    /// Deposit underlying assets during fundraising and receive shares
    ///
    /// Security considerations:
    /// - FUNDRAISING phase only; min-deposit and max-capacity enforced
    /// - Uses checked math for share calculation
    /// - Follows checks-effects-interactions pattern
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, amount)
    }

    /// Withdraw underlying assets by burning shares
    ///
    /// The first eligible withdrawal after profit accrual triggers fee
    /// realization as a side effect (at most once per cooldown window),
    /// gated by the liquidation guard over the supported-asset registry.
    /// Pass the vault's supported-asset token accounts as remaining accounts.
    pub fn withdraw(ctx: Context<Withdraw>, assets: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, assets)
    }

    /// Close fundraising and start a new trading epoch
    ///
    /// Security considerations:
    /// - Manager-only (has_one constraint)
    /// - Requires total assets at or above the minimum capacity
    /// - Snapshots the performance-fee high-water mark
    pub fn go_live(ctx: Context<GoLive>) -> Result<()> {
        instructions::go_live::handler(ctx)
    }

    /// Return a live vault to fundraising
    ///
    /// Fails with MustLiquidateAllPositions unless every registered asset
    /// balance is zero. Does not increment the epoch counter.
    pub fn return_to_fundraising(ctx: Context<ReturnToFundraising>) -> Result<()> {
        instructions::return_to_fundraising::handler(ctx)
    }

    /// Manager-initiated fee realization
    ///
    /// Fails with ManualLiquidationRequired unless every registered asset
    /// balance is zero: performance fees are never paid on paper gains.
    pub fn realize_profit(ctx: Context<RealizeProfit>) -> Result<()> {
        instructions::realize_profit::handler(ctx)
    }

    /// Pause the vault (manager or governance)
    pub fn pause(ctx: Context<SetPause>) -> Result<()> {
        instructions::pause::pause(ctx)
    }

    /// Unpause the vault (manager or governance)
    pub fn unpause(ctx: Context<SetPause>) -> Result<()> {
        instructions::pause::unpause(ctx)
    }

    /// Declare or clear an incident state (manager-only)
    pub fn set_vault_state(ctx: Context<SetVaultState>, new_state: EpochState) -> Result<()> {
        instructions::set_vault_state::handler(ctx, new_state)
    }

    /// Add or update a whitelist entry for an asset (governance-only)
    pub fn set_asset_whitelist(
        ctx: Context<SetAssetWhitelist>,
        asset_mint: Pubkey,
        asset_type: u8,
        enabled: bool,
    ) -> Result<()> {
        instructions::set_asset_whitelist::handler(ctx, asset_mint, asset_type, enabled)
    }

    /// Register a whitelisted non-underlying asset (manager-only)
    ///
    /// The liquidation guard only sees registered assets; registration is
    /// append-only and records the vault's token account for the asset.
    pub fn add_supported_asset(ctx: Context<AddSupportedAsset>) -> Result<()> {
        instructions::add_supported_asset::handler(ctx)
    }

    /// Update a supported asset's valuation (governance-only)
    pub fn set_asset_valuation(
        ctx: Context<SetAssetValuation>,
        asset_mint: Pubkey,
        unit_value: u64,
    ) -> Result<()> {
        instructions::set_asset_whitelist::set_valuation(ctx, asset_mint, unit_value)
    }

    /// Update the fee schedule (governance-only, bounded)
    pub fn update_fees(
        ctx: Context<UpdateFees>,
        management_fee_bps: u16,
        performance_fee_bps: u16,
        withdrawal_fee_bps: u16,
        protocol_fee_share_bps: u16,
    ) -> Result<()> {
        instructions::update_fees::handler(
            ctx,
            management_fee_bps,
            performance_fee_bps,
            withdrawal_fee_bps,
            protocol_fee_share_bps,
        )
    }

    /// Read-only view of the auto-realization controller
    pub fn get_auto_realization_status(
        ctx: Context<GetAutoRealizationStatus>,
    ) -> Result<AutoRealizationStatus> {
        instructions::status::auto_realization_status(ctx)
    }

    /// Read-only simulation of a withdrawal's realization side effect
    pub fn preview_withdrawal_impact(
        ctx: Context<PreviewWithdrawalImpact>,
        assets: u64,
    ) -> Result<WithdrawalImpact> {
        instructions::status::preview_withdrawal_impact(ctx, assets)
    }
}
