use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::{CONFIG_SEED, ESCROW_SEED, RAFFLE_SEED, UID_LENGTH, USER_SEED};
use crate::error::RaffleError;
use crate::events::TicketPurchased;
use crate::helpers::{transfer_sol_from_signer, transfer_tokens};
use crate::state::{GlobalConfig, Raffle, UserTicket};
use crate::utils::split_payment;

/// Accounts required to buy raffle tickets.
///
/// Purchases are co-signed by the platform authority. The token accounts are
/// only needed when the raffle is priced in an SPL token.
#[derive(Accounts)]
#[instruction(idx: u32, uid: [u8; UID_LENGTH])]
pub struct BuyTicket<'info> {
    /// The wallet paying for the tickets.
    #[account(mut)]
    pub buyer: Signer<'info>,

    /// Platform co-signer.
    pub authority: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = global_config.bump,
        constraint = global_config.authority == authority.key() @ RaffleError::InvalidSigner
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        mut,
        seeds = [RAFFLE_SEED, idx.to_le_bytes().as_ref()],
        bump = raffle.bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    #[account(
        mut,
        seeds = [ESCROW_SEED, raffle.key().as_ref()],
        bump = raffle.escrow_bump
    )]
    pub escrow: SystemAccount<'info>,

    /// Tickets held by `uid` in this raffle, created on its first purchase.
    #[account(
        init_if_needed,
        payer = buyer,
        space = 8 + UserTicket::INIT_SPACE,
        seeds = [USER_SEED, raffle.key().as_ref(), uid.as_ref()],
        bump
    )]
    pub user_ticket: Box<Account<'info, UserTicket>>,

    /// CHECK: must be the configured fee destination
    #[account(
        mut,
        address = global_config.fee_destination @ RaffleError::InvalidPubkey
    )]
    pub fee_destination: UncheckedAccount<'info>,

    #[account(
        constraint = payment_mint.key() == raffle.payment_mint @ RaffleError::InvalidMint
    )]
    pub payment_mint: Option<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        constraint = buyer_token_account.mint == raffle.payment_mint
            && buyer_token_account.owner == buyer.key()
            @ RaffleError::InvalidTokenAccount
    )]
    pub buyer_token_account: Option<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = fee_token_account.mint == raffle.payment_mint
            && fee_token_account.owner == fee_destination.key()
            @ RaffleError::InvalidTokenAccount
    )]
    pub fee_token_account: Option<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = escrow_token_account.mint == raffle.payment_mint
            && escrow_token_account.owner == escrow.key()
            @ RaffleError::InvalidTokenAccount
    )]
    pub escrow_token_account: Option<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Option<Interface<'info, TokenInterface>>,
    pub system_program: Program<'info, System>,
}

/// Sells `amount` tickets of raffle `idx` to the buyer id `uid`.
///
/// 1% of the cost goes to the fee destination, the rest to the raffle escrow.
///
/// # Arguments
/// * `ctx` - Context holding the BuyTicket accounts
/// * `idx` - Index of the raffle
/// * `uid` - Buyer id from the off-chain identity system
/// * `amount` - Number of tickets
pub fn process_buy_ticket(
    ctx: Context<BuyTicket>,
    idx: u32,
    uid: [u8; UID_LENGTH],
    amount: u32,
) -> Result<()> {
    require!(uid != [0u8; UID_LENGTH], RaffleError::InvalidUUID);
    let now = Clock::get()?.unix_timestamp;

    let raffle = &mut ctx.accounts.raffle;
    raffle.check_sale_open(now, amount)?;
    let limit = raffle.wallet_limit()?;

    let user_ticket = &mut ctx.accounts.user_ticket;
    user_ticket.bind(idx, ctx.accounts.buyer.key(), uid, ctx.bumps.user_ticket)?;
    user_ticket.add_tickets(amount, limit)?;

    let split = split_payment(raffle.price, amount)?;
    raffle.record_purchase(uid, amount)?;

    if raffle.is_native_payment() {
        require!(
            ctx.accounts.buyer.lamports() >= split.total_cost,
            RaffleError::InsufficientBalance
        );
        if split.fee > 0 {
            transfer_sol_from_signer(
                &ctx.accounts.buyer,
                &ctx.accounts.fee_destination.to_account_info(),
                &ctx.accounts.system_program,
                split.fee,
            )?;
        }
        transfer_sol_from_signer(
            &ctx.accounts.buyer,
            &ctx.accounts.escrow.to_account_info(),
            &ctx.accounts.system_program,
            split.escrowed,
        )?;
    } else {
        let (
            Some(payment_mint),
            Some(buyer_token_account),
            Some(fee_token_account),
            Some(escrow_token_account),
            Some(token_program),
        ) = (
            ctx.accounts.payment_mint.as_ref(),
            ctx.accounts.buyer_token_account.as_ref(),
            ctx.accounts.fee_token_account.as_ref(),
            ctx.accounts.escrow_token_account.as_ref(),
            ctx.accounts.token_program.as_ref(),
        )
        else {
            return err!(RaffleError::UninitializedAccount);
        };

        require!(
            buyer_token_account.amount >= split.total_cost,
            RaffleError::InsufficientBalance
        );
        if split.fee > 0 {
            transfer_tokens(
                buyer_token_account,
                fee_token_account,
                payment_mint,
                &ctx.accounts.buyer,
                token_program,
                split.fee,
            )?;
        }
        transfer_tokens(
            buyer_token_account,
            escrow_token_account,
            payment_mint,
            &ctx.accounts.buyer,
            token_program,
            split.escrowed,
        )?;
    }

    msg!(
        "Raffle {}: sold {} tickets, {}/{}",
        idx,
        amount,
        raffle.total_sold,
        raffle.total_supply
    );
    emit!(TicketPurchased {
        raffle_idx: idx,
        buyer: ctx.accounts.buyer.key(),
        uid,
        amount,
        fee: split.fee,
        escrowed: split.escrowed,
        total_sold: raffle.total_sold,
    });

    Ok(())
}
