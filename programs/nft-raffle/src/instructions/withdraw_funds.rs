use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{ESCROW_SEED, RAFFLE_SEED};
use crate::error::RaffleError;
use crate::events::FundsWithdrawn;
use crate::helpers::{transfer_sol_with_seeds, transfer_tokens_with_seeds};
use crate::state::Raffle;

/// Accounts required for the creator to collect ticket proceeds.
#[derive(Accounts)]
#[instruction(idx: u32)]
pub struct WithdrawFunds<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [RAFFLE_SEED, idx.to_le_bytes().as_ref()],
        bump = raffle.bump,
        constraint = raffle.creator == creator.key() @ RaffleError::Unauthorized
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    #[account(
        mut,
        seeds = [ESCROW_SEED, raffle.key().as_ref()],
        bump = raffle.escrow_bump
    )]
    pub escrow: SystemAccount<'info>,

    #[account(
        constraint = payment_mint.key() == raffle.payment_mint @ RaffleError::InvalidMint
    )]
    pub payment_mint: Option<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        constraint = escrow_token_account.mint == raffle.payment_mint
            && escrow_token_account.owner == escrow.key()
            @ RaffleError::InvalidTokenAccount
    )]
    pub escrow_token_account: Option<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = creator_token_account.mint == raffle.payment_mint
            && creator_token_account.owner == creator.key()
            @ RaffleError::InvalidTokenAccount
    )]
    pub creator_token_account: Option<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Option<Interface<'info, TokenInterface>>,
    pub system_program: Program<'info, System>,
}

/// Sends the whole escrow balance of raffle `idx` to its creator. Allowed
/// once, after the sale has ended, whether or not a winner was drawn.
///
/// # Arguments
/// * `ctx` - Context holding the WithdrawFunds accounts
/// * `idx` - Index of the raffle
pub fn process_withdraw_funds(ctx: Context<WithdrawFunds>, idx: u32) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.raffle.mark_withdrawn(now)?;

    let raffle_key = ctx.accounts.raffle.key();
    let signer_seeds: &[&[&[u8]]] = &[&[
        ESCROW_SEED,
        raffle_key.as_ref(),
        &[ctx.accounts.raffle.escrow_bump],
    ]];

    let amount = if ctx.accounts.raffle.is_native_payment() {
        let amount = ctx.accounts.escrow.lamports();
        if amount > 0 {
            transfer_sol_with_seeds(
                &ctx.accounts.escrow.to_account_info(),
                &ctx.accounts.creator.to_account_info(),
                &ctx.accounts.system_program,
                signer_seeds,
                amount,
            )?;
        }
        amount
    } else {
        let (
            Some(payment_mint),
            Some(escrow_token_account),
            Some(creator_token_account),
            Some(token_program),
        ) = (
            ctx.accounts.payment_mint.as_ref(),
            ctx.accounts.escrow_token_account.as_ref(),
            ctx.accounts.creator_token_account.as_ref(),
            ctx.accounts.token_program.as_ref(),
        )
        else {
            return err!(RaffleError::UninitializedAccount);
        };

        let amount = escrow_token_account.amount;
        if amount > 0 {
            transfer_tokens_with_seeds(
                escrow_token_account,
                creator_token_account,
                payment_mint,
                &ctx.accounts.escrow.to_account_info(),
                token_program,
                signer_seeds,
                amount,
            )?;
        }
        amount
    };

    msg!("Raffle {}: withdrew {} to the creator", idx, amount);
    emit!(FundsWithdrawn {
        raffle_idx: idx,
        creator: ctx.accounts.creator.key(),
        amount,
    });

    Ok(())
}
