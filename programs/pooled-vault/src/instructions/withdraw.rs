use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, Mint, Token, TokenAccount, Transfer};

use crate::{constants::*, errors::*, events::*, state::*};

/// Withdraw underlying assets by burning shares
///
/// The auto-realization controller runs first: the first eligible withdrawal
/// after profit has accrued (cooldown elapsed, all positions liquidated)
/// settles management and performance fees as a side effect. A failing
/// liquidation guard skips realization silently; every other failure aborts
/// the whole call.
///
/// Remaining accounts: the vault's token account for each supported asset,
/// in registry order. These feed the liquidation guard.
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// Share owner withdrawing assets
    #[account(mut)]
    pub user: Signer<'info>,

    /// Vault state PDA
    #[account(
        mut,
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

    /// Share mint
    #[account(
        mut,
        address = vault_state.share_mint,
    )]
    pub share_mint: Account<'info, Mint>,

    /// Vault authority PDA
    /// CHECK: PDA used as authority, validated by seeds
    #[account(
        seeds = [VAULT_AUTHORITY_SEED, vault_state.asset_mint.as_ref()],
        bump = vault_state.authority_bump,
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// User's share token account (burn source)
    #[account(
        mut,
        constraint = user_share_account.mint == vault_state.share_mint @ VaultError::InvalidMint,
        constraint = user_share_account.owner == user.key() @ VaultError::InvalidOwner,
    )]
    pub user_share_account: Account<'info, TokenAccount>,

    /// Receiver's asset token account (payout destination)
    #[account(
        mut,
        constraint = receiver_asset_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
    )]
    pub receiver_asset_account: Account<'info, TokenAccount>,

    /// Vault's token account for the underlying asset
    #[account(
        mut,
        constraint = vault_token_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = vault_token_account.owner == vault_authority.key() @ VaultError::InvalidOwner,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    /// Manager's asset token account (withdrawal + management + performance fees)
    #[account(
        mut,
        constraint = manager_fee_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = manager_fee_account.owner == vault_state.manager @ VaultError::InvalidOwner,
    )]
    pub manager_fee_account: Account<'info, TokenAccount>,

    /// Protocol treasury's asset token account (protocol share of performance fee)
    #[account(
        mut,
        constraint = treasury_fee_account.mint == vault_state.asset_mint @ VaultError::InvalidMint,
        constraint = treasury_fee_account.owner == vault_state.protocol_treasury @ VaultError::InvalidOwner,
    )]
    pub treasury_fee_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Withdraw>, assets: u64) -> Result<()> {
    let vault_state = &mut ctx.accounts.vault_state;

    // CHECKS: pause overlay plus phase eligibility
    vault_state.ensure_can_withdraw()?;

    // Zero-amount withdraw is a legal no-op
    if assets == 0 {
        return Ok(());
    }

    let now = Clock::get()?.unix_timestamp;
    let mut total_assets = ctx.accounts.vault_token_account.amount;

    let asset_mint_key = vault_state.asset_mint;
    let authority_bump = vault_state.authority_bump;
    let authority_seeds: &[&[u8]] = &[
        VAULT_AUTHORITY_SEED,
        asset_mint_key.as_ref(),
        &[authority_bump],
    ];
    let signer_seeds = &[&authority_seeds[..]];

    // Auto-realization controller: runs before the withdrawal's own math.
    // A failing liquidation guard is the single silently-skipped condition.
    if vault_state.can_auto_realize(total_assets, now) {
        let registry = &ctx.accounts.supported_asset_registry;
        let balances = registry.read_balances(ctx.remaining_accounts)?;
        if registry.all_liquidated(&balances) {
            let fees = vault_state.realization_fees(total_assets, now)?;

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

            total_assets = total_assets
                .checked_sub(fees.total())
                .ok_or(VaultError::MathOverflow)?;
            vault_state.settle_realization(total_assets, now);

            emit!(AutoRealizationTriggered {
                vault: vault_state.key(),
                triggered_by: ctx.accounts.user.key(),
                management_fee: fees.management_fee,
                performance_fee: fees.performance_fee,
                protocol_portion: fees.protocol_portion,
                manager_portion: fees.manager_portion,
                new_start_assets: total_assets,
                timestamp: now,
            });
        }
    }

    // Withdrawal proper: the vault pays out `assets` in total, split between
    // the receiver and the manager's withdrawal fee
    require!(
        total_assets >= assets,
        VaultError::InsufficientUnderlyingAssets
    );

    let withdrawal_fee = vault_state.withdrawal_fee_amount(assets)?;
    let net_amount = assets - withdrawal_fee;
    let shares_to_burn = vault_state.preview_withdraw(assets, total_assets)?;

    require!(
        ctx.accounts.user_share_account.amount >= shares_to_burn,
        VaultError::InsufficientShares
    );

    // EFFECTS: Update share supply before external calls
    vault_state.total_shares = vault_state
        .total_shares
        .checked_sub(shares_to_burn)
        .ok_or(VaultError::InsufficientShares)?;

    // INTERACTIONS: Burn shares, then pay out
    let burn_ctx = CpiContext::new(
        ctx.accounts.token_program.to_account_info(),
        Burn {
            mint: ctx.accounts.share_mint.to_account_info(),
            from: ctx.accounts.user_share_account.to_account_info(),
            authority: ctx.accounts.user.to_account_info(),
        },
    );
    token::burn(burn_ctx, shares_to_burn)?;

    if net_amount > 0 {
        let transfer_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault_token_account.to_account_info(),
                to: ctx.accounts.receiver_asset_account.to_account_info(),
                authority: ctx.accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(transfer_ctx, net_amount)?;
    }

    if withdrawal_fee > 0 {
        let transfer_ctx = CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault_token_account.to_account_info(),
                to: ctx.accounts.manager_fee_account.to_account_info(),
                authority: ctx.accounts.vault_authority.to_account_info(),
            },
            signer_seeds,
        );
        token::transfer(transfer_ctx, withdrawal_fee)?;
    }

    emit!(Withdrawn {
        vault: vault_state.key(),
        user: ctx.accounts.user.key(),
        receiver: ctx.accounts.receiver_asset_account.key(),
        asset_amount: assets,
        withdrawal_fee,
        shares_burned: shares_to_burn,
        total_shares: vault_state.total_shares,
        timestamp: now,
    });

    Ok(())
}
