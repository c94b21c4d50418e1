use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Declare or clear an incident state (EMERGENCY, LIQUIDATING, FROZEN)
///
/// Incident states are mutually exclusive with deposit/withdraw eligibility.
/// They are entered from LIVE and may move between each other or back to
/// LIVE; fundraising is reachable only through return_to_fundraising.
#[derive(Accounts)]
pub struct SetVaultState<'info> {
    /// Vault manager
    pub manager: Signer<'info>,

    /// Vault state PDA
    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
        has_one = manager @ VaultError::OnlyManager,
    )]
    pub vault_state: Account<'info, VaultState>,
}

pub fn handler(ctx: Context<SetVaultState>, new_state: EpochState) -> Result<()> {
    let vault_state = &mut ctx.accounts.vault_state;

    vault_state.ensure_not_paused()?;

    let allowed = |s: EpochState| {
        matches!(
            s,
            EpochState::Live | EpochState::Emergency | EpochState::Liquidating | EpochState::Frozen
        )
    };
    require!(
        allowed(vault_state.epoch_state) && allowed(new_state)
            && vault_state.epoch_state != new_state,
        VaultError::InvalidVaultState
    );

    let previous_state = vault_state.epoch_state;
    vault_state.epoch_state = new_state;

    emit!(VaultStateChanged {
        vault: vault_state.key(),
        previous_state,
        new_state,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
