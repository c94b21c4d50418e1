use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Update the vault's fee schedule through the governance boundary
///
/// The engine stores u16 basis points and trusts authorized updates; the
/// caps here are the factory-side sanity bounds.
#[derive(Accounts)]
pub struct UpdateFees<'info> {
    /// Governance authority
    pub governance: Signer<'info>,

    /// Vault state PDA
    #[account(
        mut,
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
        has_one = governance @ VaultError::OnlyGovernance,
    )]
    pub vault_state: Account<'info, VaultState>,
}

pub fn handler(
    ctx: Context<UpdateFees>,
    management_fee_bps: u16,
    performance_fee_bps: u16,
    withdrawal_fee_bps: u16,
    protocol_fee_share_bps: u16,
) -> Result<()> {
    VaultState::validate_fee_schedule(
        management_fee_bps,
        performance_fee_bps,
        withdrawal_fee_bps,
        protocol_fee_share_bps,
    )?;

    let vault_state = &mut ctx.accounts.vault_state;
    vault_state.management_fee_bps = management_fee_bps;
    vault_state.performance_fee_bps = performance_fee_bps;
    vault_state.withdrawal_fee_bps = withdrawal_fee_bps;
    vault_state.protocol_fee_share_bps = protocol_fee_share_bps;

    emit!(FeesUpdated {
        vault: vault_state.key(),
        management_fee_bps,
        performance_fee_bps,
        withdrawal_fee_bps,
        protocol_fee_share_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
