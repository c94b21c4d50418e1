use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::{constants::*, errors::*, events::*, state::*};

/// Take the vault live: close fundraising and start a new trading epoch
#[derive(Accounts)]
pub struct GoLive<'info> {
    /// Vault manager
    #[account(mut)]
    pub manager: Signer<'info>,

    /// Vault state PDA
    /// Security: has_one constraint validates the manager from state
    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
        has_one = manager @ VaultError::OnlyManager,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Vault authority PDA
    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Vault's token account; its balance is the high-water-mark snapshot
    #[account(
        constraint = vault_token_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = vault_token_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,
}

pub fn handler(ctx: Context<GoLive>) -> Result<()> {
    let vault_state = &mut ctx.accounts.vault_state;

    vault_state.ensure_not_paused()?;
    require!(
        vault_state.epoch_state == EpochState::Fundraising,
        VaultError::InvalidVaultState
    );

    let total_assets = ctx.accounts.vault_token_account.amount;
    require!(vault_state.can_go_live(total_assets), VaultError::CannotGoLive);

    let now = Clock::get()?.unix_timestamp;
    vault_state.begin_epoch(total_assets, now);

    emit!(EpochStarted {
        vault: vault_state.key(),
        epoch: vault_state.current_epoch,
        start_assets: vault_state.start_assets,
        timestamp: now,
    });

    Ok(())
}
