use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::{constants::*, errors::*, events::*, state::*};

/// Return a live vault to fundraising
///
/// Requires the liquidation guard to pass: the vault must hold only the
/// underlying asset among its registered assets. The epoch counter is not
/// incremented here; the next go_live does that.
///
/// Remaining accounts: the vault's token account for each supported asset,
/// in registry order.
#[derive(Accounts)]
pub struct ReturnToFundraising<'info> {
    /// Vault manager
    #[account(mut)]
    pub manager: Signer<'info>,

    /// Vault state PDA
    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
        has_one = manager @ VaultError::OnlyManager,
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

pub fn handler(ctx: Context<ReturnToFundraising>) -> Result<()> {
    let vault_state = &mut ctx.accounts.vault_state;

    vault_state.ensure_not_paused()?;
    require!(
        vault_state.epoch_state == EpochState::Live,
        VaultError::InvalidVaultState
    );

    let registry = &ctx.accounts.supported_asset_registry;
    let balances = registry.read_balances(ctx.remaining_accounts)?;
    require!(
        registry.all_liquidated(&balances),
        VaultError::MustLiquidateAllPositions
    );

    vault_state.epoch_state = EpochState::Fundraising;

    emit!(ReturnedToFundraising {
        vault: vault_state.key(),
        epoch: vault_state.current_epoch,
        total_assets: ctx.accounts.vault_token_account.amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
