use anchor_lang::prelude::*;

use crate::{constants::*, errors::*, events::*, state::*};

/// Add or update a whitelist entry for an asset
///
/// Governance-only; the whitelist PDA is created on first use. Disabling an
/// entry keeps it listed but blocks future add_supported_asset calls.
#[derive(Accounts)]
pub struct SetAssetWhitelist<'info> {
    /// Governance authority
    #[account(mut)]
    pub governance: Signer<'info>,

    /// Vault state PDA
    #[account(
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
        has_one = governance @ VaultError::OnlyGovernance,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Asset whitelist PDA
    #[account(
        init_if_needed,
        payer = governance,
        space = AssetWhitelist::SPACE,
        seeds = [ASSET_WHITELIST_SEED, vault_state.key().as_ref()],
        bump
    )]
    pub asset_whitelist: Account<'info, AssetWhitelist>,

    pub system_program: Program<'info, System>,
}

pub fn handler(
    ctx: Context<SetAssetWhitelist>,
    asset_mint: Pubkey,
    asset_type: u8,
    enabled: bool,
) -> Result<()> {
    let whitelist = &mut ctx.accounts.asset_whitelist;

    // Initialize on first use
    if whitelist.vault == Pubkey::default() {
        whitelist.vault = ctx.accounts.vault_state.key();
        whitelist.bump = ctx.bumps.asset_whitelist;
        whitelist.assets = Vec::new();
    }

    whitelist.upsert(asset_mint, asset_type, enabled)?;

    emit!(AssetWhitelistUpdated {
        vault: whitelist.vault,
        asset_mint,
        asset_type,
        enabled,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

/// Update a supported asset's valuation (asset-handler adapter)
///
/// `unit_value` is the underlying value of VALUE_SCALE raw units; 0 marks
/// the price feed unavailable, which degrades that asset's contribution in
/// assets_to_liquidate to zero without hiding the position.
#[derive(Accounts)]
pub struct SetAssetValuation<'info> {
    /// Governance authority
    pub governance: Signer<'info>,

    /// Vault state PDA
    #[account(
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
        has_one = governance @ VaultError::OnlyGovernance,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Supported-asset registry
    #[account(
        mut,
        seeds = [SUPPORTED_ASSETS_SEED, vault_state.key().as_ref()],
        bump = supported_asset_registry.bump,
    )]
    pub supported_asset_registry: Account<'info, SupportedAssetRegistry>,
}

pub fn set_valuation(
    ctx: Context<SetAssetValuation>,
    asset_mint: Pubkey,
    unit_value: u64,
) -> Result<()> {
    let registry = &mut ctx.accounts.supported_asset_registry;

    let entry = registry
        .get_mut(&asset_mint)
        .ok_or(VaultError::AssetNotSupported)?;
    entry.unit_value = unit_value;

    emit!(AssetValuationUpdated {
        vault: ctx.accounts.vault_state.key(),
        asset_mint,
        unit_value,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
