use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{Mint, Token, TokenAccount},
};

use crate::{constants::*, errors::*, events::*, state::*};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct InitializeParams {
    /// Manager that runs the lifecycle and receives fees
    pub manager: Pubkey,
    /// Governance authority for fee/whitelist updates
    pub governance: Pubkey,
    /// Treasury receiving the protocol share of performance fees
    pub protocol_treasury: Pubkey,
    pub min_capacity: u64,
    pub max_capacity: u64,
    pub min_deposit: u64,
    pub management_fee_bps: u16,
    pub performance_fee_bps: u16,
    pub withdrawal_fee_bps: u16,
    pub protocol_fee_share_bps: u16,
}

/// Initialize a new vault for a given underlying asset
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Deployer paying for account creation (the factory boundary)
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Vault state PDA
    /// Security: Initialized with proper space and padding for upgrades
    #[account(
        init,
        payer = payer,
        space = VAULT_STATE_SIZE,
        seeds = [VAULT_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Underlying asset mint (the token users deposit)
    pub asset_mint: Account<'info, Mint>,

    /// Share token mint PDA (vault shares)
    /// Security: Mint authority is vault_authority PDA
    #[account(
        init,
        payer = payer,
        seeds = [SHARE_MINT_SEED, asset_mint.key().as_ref()],
        bump,
        mint::decimals = asset_mint.decimals,
        mint::authority = vault_authority,
    )]
    pub share_mint: Account<'info, Mint>,

    /// Vault authority PDA - mint authority for shares, owner of token accounts
    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, asset_mint.key().as_ref()],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Vault's token account for the underlying asset
    #[account(
        init,
        payer = payer,
        associated_token::mint = asset_mint,
        associated_token::authority = vault_authority,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// Supported-asset registry, created empty; the liquidation guard walks it
    #[account(
        init,
        payer = payer,
        space = SupportedAssetRegistry::SPACE,
        seeds = [SUPPORTED_ASSETS_SEED, vault_state.key().as_ref()],
        bump
    )]
    pub supported_asset_registry: Account<'info, SupportedAssetRegistry>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
    // CHECKS: Fee caps are the factory boundary; the engine only stores u16 bps
    VaultState::validate_fee_schedule(
        params.management_fee_bps,
        params.performance_fee_bps,
        params.withdrawal_fee_bps,
        params.protocol_fee_share_bps,
    )?;
    VaultState::validate_capacity_bounds(params.min_capacity, params.max_capacity)?;

    let vault_state = &mut ctx.accounts.vault_state;

    // EFFECTS: Initialize vault state
    vault_state.manager = params.manager;
    vault_state.governance = params.governance;
    vault_state.protocol_treasury = params.protocol_treasury;
    vault_state.asset_mint = ctx.accounts.asset_mint.key();
    vault_state.share_mint = ctx.accounts.share_mint.key();
    vault_state.total_shares = 0;
    vault_state.epoch_state = EpochState::Fundraising;
    vault_state.paused = false;
    vault_state.current_epoch = 0;
    vault_state.start_assets = 0;
    vault_state.last_management_fee_timestamp = 0;
    vault_state.is_profit_realized = false;
    vault_state.last_realization_timestamp = 0;
    vault_state.min_capacity = params.min_capacity;
    vault_state.max_capacity = params.max_capacity;
    vault_state.min_deposit = params.min_deposit;
    vault_state.management_fee_bps = params.management_fee_bps;
    vault_state.performance_fee_bps = params.performance_fee_bps;
    vault_state.withdrawal_fee_bps = params.withdrawal_fee_bps;
    vault_state.protocol_fee_share_bps = params.protocol_fee_share_bps;
    vault_state.bump = ctx.bumps.vault_state;
    vault_state.share_bump = ctx.bumps.share_mint;
    vault_state.authority_bump = ctx.bumps.vault_authority;
    vault_state._reserved = [0; 128];

    let registry = &mut ctx.accounts.supported_asset_registry;
    registry.vault = vault_state.key();
    registry.assets = Vec::new();
    registry.bump = ctx.bumps.supported_asset_registry;

    emit!(VaultInitialized {
        vault: vault_state.key(),
        manager: vault_state.manager,
        asset_mint: vault_state.asset_mint,
        share_mint: vault_state.share_mint,
        max_capacity: vault_state.max_capacity,
        min_capacity: vault_state.min_capacity,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
