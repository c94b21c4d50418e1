use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Pause or unpause the vault
///
/// The pause overlay is orthogonal to the epoch state: while paused,
/// deposit/withdraw and every lifecycle transition fail. Either the manager
/// or the governance authority may toggle it.
#[derive(Accounts)]
pub struct SetPause<'info> {
    /// Manager or governance authority
    pub authority: Signer<'info>,

    /// Vault state PDA
    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
        constraint = authority.key() == vault_state.manager
            || authority.key() == vault_state.governance @ VaultError::OnlyManager,
    )]
    pub vault_state: Account<'info, VaultState>,
}

pub fn pause(ctx: Context<SetPause>) -> Result<()> {
    let vault_state = &mut ctx.accounts.vault_state;
    require!(!vault_state.paused, VaultError::VaultPaused);
    vault_state.paused = true;

    emit!(PauseToggled {
        vault: vault_state.key(),
        paused: true,
        authority: ctx.accounts.authority.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn unpause(ctx: Context<SetPause>) -> Result<()> {
    let vault_state = &mut ctx.accounts.vault_state;
    require!(vault_state.paused, VaultError::VaultNotPaused);
    vault_state.paused = false;

    emit!(PauseToggled {
        vault: vault_state.key(),
        paused: false,
        authority: ctx.accounts.authority.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
