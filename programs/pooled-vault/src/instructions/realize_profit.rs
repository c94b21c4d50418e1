use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Manager-initiated fee realization
///
/// The core exploit-prevention contract: the manager must fully cash out
/// trading positions into the underlying asset before any performance fee
/// can be crystallized. Profit is measured purely on the underlying balance
/// against the epoch's high-water mark, never on mark-to-market value.
///
/// Remaining accounts: the vault's token account for each supported asset,
/// in registry order.
#[derive(Accounts)]
pub struct RealizeProfit<'info> {
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
        mut,
        constraint = vault_token_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = vault_token_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// Manager's asset token account (management fee + manager share)
    #[account(
        mut,
        constraint = manager_fee_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = manager_fee_account.owner == vault_state.manager @ VaultError::InvalidOwner,
    )]
    pub manager_fee_account: Account<'info, TokenAccount>,

    /// Protocol treasury's asset token account (protocol share)
    #[account(
        mut,
        constraint = treasury_fee_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = treasury_fee_account.owner == vault_state.protocol_treasury @ VaultError::InvalidOwner,
    )]
    pub treasury_fee_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<RealizeProfit>) -> Result<()> {
    let vault_state = &mut ctx.accounts.vault_state;

    vault_state.ensure_not_paused()?;
    require!(
        vault_state.epoch_state == EpochState::Live,
        VaultError::InvalidVaultState
    );

    // The liquidation guard is mandatory here, unlike the auto path
    let registry = &ctx.accounts.supported_asset_registry;
    let balances = registry.read_balances(ctx.remaining_accounts)?;
    require!(
        registry.all_liquidated(&balances),
        VaultError::ManualLiquidationRequired
    );

    let now = Clock::get()?.unix_timestamp;
    let total_assets = ctx.accounts.vault_token_account.amount;
    let fees = vault_state.realization_fees(total_assets, now)?;

    let asset_mint_key = vault_state.asset_mint;
    let authority_bump = vault_state.authority_bump;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        asset_mint_key.as_ref(),
        &[authority_bump],
    ];
    let signer_seeds = &[&authority_seeds[..]];

    let manager_amount = fees
        .management_fee
        .checked_add(fees.manager_portion)
        .ok_or(VaultError::MathOverflow)?;
    if manager_amount > 0 {
        let transfer_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault_token_account.to_account_info(),
                to: ctx.accounts.manager_fee_account.to_account_info(),
                authority: ctx.accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(transfer_ctx, manager_amount)?;
    }
    if fees.protocol_portion > 0 {
        let transfer_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault_token_account.to_account_info(),
                to: ctx.accounts.treasury_fee_account.to_account_info(),
                authority: ctx.accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(transfer_ctx, fees.protocol_portion)?;
    }

    let post_fee_assets = total_assets
        .checked_sub(fees.total())
        .ok_or(VaultError::MathOverflow)?;
    vault_state.settle_realization(post_fee_assets, now);

    emit!(ProfitRealized {
        vault: vault_state.key(),
        epoch: vault_state.current_epoch,
        management_fee: fees.management_fee,
        performance_fee: fees.performance_fee,
        protocol_portion: fees.protocol_portion,
        manager_portion: fees.manager_portion,
        new_start_assets: post_fee_assets,
        timestamp: now,
    });

    Ok(())
}
