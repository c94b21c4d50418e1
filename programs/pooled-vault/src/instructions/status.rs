use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::{constants::*, errors::*, state::*};

/// Read-only view of the auto-realization controller
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct AutoRealizationStatus {
    /// Whether a realization happened within the current cooldown window
    pub is_realized: bool,
    pub last_realization_timestamp: i64,
    /// Seconds until the next realization becomes eligible (0 = now)
    pub time_to_next_eligibility: i64,
    /// Underlying balance above the epoch high-water mark
    pub has_unrealized_profits: bool,
}

/// Read-only simulation of a withdrawal's realization side effect
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct WithdrawalImpact {
    pub will_auto_realize: bool,
    /// Management + performance fees a triggered realization would settle
    pub estimated_fees: u64,
}

#[derive(Accounts)]
pub struct GetAutoRealizationStatus<'info> {
    /// Vault state PDA
    #[account(
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Vault authority PDA
    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Vault's token account for the underlying asset
    #[account(
        constraint = vault_token_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = vault_token_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,
}

pub fn auto_realization_status(
    ctx: Context<GetAutoRealizationStatus>,
) -> Result<AutoRealizationStatus> {
    let vault_state = &ctx.accounts.vault_state;
    let now = Clock::get()?.unix_timestamp;
    let total_assets = ctx.accounts.vault_token_account.amount;

    Ok(AutoRealizationStatus {
        is_realized: vault_state.is_realized_in_window(now),
        last_realization_timestamp: vault_state.last_realization_timestamp,
        time_to_next_eligibility: vault_state.time_to_next_eligibility(now),
        has_unrealized_profits: vault_state.has_unrealized_profits(total_assets),
    })
}

/// Remaining accounts: the vault's token account for each supported asset,
/// in registry order (same shape as withdraw)
#[derive(Accounts)]
pub struct PreviewWithdrawalImpact<'info> {
    /// Vault state PDA
    #[account(
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Supported-asset registry (liquidation guard input)
    #[account(
        seeds = [SUPPORTED_ASSETS_SEED, vault_state.key().as_ref()],
        bump = supported_asset_registry.bump,
    )]
    pub supported_asset_registry: Account<'info, SupportedAssetRegistry>,

    /// Vault authority PDA
    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Vault's token account for the underlying asset
    #[account(
        constraint = vault_token_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = vault_token_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,
}

pub fn preview_withdrawal_impact(
    ctx: Context<PreviewWithdrawalImpact>,
    _assets: u64,
) -> Result<WithdrawalImpact> {
    let vault_state = &ctx.accounts.vault_state;
    let now = Clock::get()?.unix_timestamp;
    let total_assets = ctx.accounts.vault_token_account.amount;

    if !vault_state.can_auto_realize(total_assets, now) {
        return Ok(WithdrawalImpact {
            will_auto_realize: false,
            estimated_fees: 0,
        });
    }

    let registry = &ctx.accounts.supported_asset_registry;
    let balances = registry.read_balances(ctx.remaining_accounts)?;
    if !registry.all_liquidated(&balances) {
        return Ok(WithdrawalImpact {
            will_auto_realize: false,
            estimated_fees: 0,
        });
    }

    let fees = vault_state.realization_fees(total_assets, now)?;
    Ok(WithdrawalImpact {
        will_auto_realize: true,
        estimated_fees: fees.total(),
    })
}
