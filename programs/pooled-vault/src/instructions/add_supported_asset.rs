use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::*, events::*, state::*};

/// Register a non-underlying asset the vault may hold through trading
///
/// Gated by the governance whitelist. The entry records the vault's token
/// account for the asset (created here if needed) so the liquidation guard
/// always knows where to look; entries are never removed.
#[derive(Accounts)]
pub struct AddSupportedAsset<'info> {
    /// Vault manager
    #[account(mut)]
    pub manager: Signer<'info>,

    /// Vault state PDA
    #[account(
        seeds = [VAULT_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.bump,
        has_one = manager @ VaultError::OnlyManager,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Governance whitelist; must already contain the asset
    #[account(
        seeds = [ASSET_WHITELIST_SEED, vault_state.key().as_ref()],
        bump = asset_whitelist.bump,
    )]
    pub asset_whitelist: Account<'info, AssetWhitelist>,

    /// Supported-asset registry
    #[account(
        mut,
        seeds = [SUPPORTED_ASSETS_SEED, vault_state.key().as_ref()],
        bump = supported_asset_registry.bump,
    )]
    pub supported_asset_registry: Account<'info, SupportedAssetRegistry>,

    /// Mint of the asset being registered
    pub asset_mint: Account<'info, Mint>,

    /// Vault authority PDA
    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Vault's token account for the new asset; watched by the guard
    #[account(
        init_if_needed,
        payer = manager,
        associated_token::mint = asset_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_asset_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<AddSupportedAsset>) -> Result<()> {
    let vault_state = &ctx.accounts.vault_state;
    let mint = ctx.accounts.asset_mint.key();

    // The underlying asset is implicitly supported
    require!(
        mint != vault_state.asset_mint,
        VaultError::AssetAlreadySupported
    );
    require!(
        ctx.accounts.asset_whitelist.is_whitelisted(&mint),
        VaultError::AssetNotWhitelisted
    );

    let registry = &mut ctx.accounts.supported_asset_registry;
    require!(!registry.is_supported(&mint), VaultError::AssetAlreadySupported);
    require!(
        registry.assets.len() < SupportedAssetRegistry::MAX_ASSETS,
        VaultError::RegistryFull
    );

    let now = Clock::get()?.unix_timestamp;
    registry.assets.push(SupportedAsset {
        mint,
        vault_token_account: ctx.accounts.vault_asset_account.key(),
        unit_value: 0,
        added_at: now,
    });

    emit!(SupportedAssetAdded {
        vault: vault_state.key(),
        asset_mint: mint,
        vault_token_account: ctx.accounts.vault_asset_account.key(),
        timestamp: now,
    });

    Ok(())
}
