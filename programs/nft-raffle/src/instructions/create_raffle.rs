use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenInterface},
};

use crate::constants::{CONFIG_SEED, ESCROW_SEED, MAX_TICKET_SUPPLY, RAFFLE_SEED};
use crate::error::RaffleError;
use crate::events::RaffleCreated;
use crate::helpers::{create_ata, transfer_sol_from_signer};
use crate::state::{GlobalConfig, PrizeKind, Raffle};

/// Accounts required to open a new raffle.
///
/// The raffle is allocated for its full ticket supply up front, so the supply
/// is bounded before the account is created.
#[derive(Accounts)]
#[instruction(idx: u32, total_supply: u32, price: u64, start_time: i64, end_time: i64)]
pub struct CreateRaffle<'info> {
    /// The raffle creator, pays for the raffle account.
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = global_config.bump,
        constraint = global_config.raffle_count == idx @ RaffleError::InvalidRaffleIdx,
        constraint = start_time < end_time @ RaffleError::InvalidDate,
        constraint = total_supply <= MAX_TICKET_SUPPLY @ RaffleError::InvalidAmount
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        init,
        payer = creator,
        space = Raffle::space(total_supply),
        seeds = [RAFFLE_SEED, idx.to_le_bytes().as_ref()],
        bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// Holds native ticket proceeds and owns every escrow token account.
    #[account(
        mut,
        seeds = [ESCROW_SEED, raffle.key().as_ref()],
        bump
    )]
    pub escrow: SystemAccount<'info>,

    /// Mint tickets are paid in. The native mint selects lamport payments.
    pub payment_mint: Box<InterfaceAccount<'info, Mint>>,

    /// CHECK: escrow ATA for `payment_mint`, created here for token payments
    #[account(mut)]
    pub escrow_token_account: Option<UncheckedAccount<'info>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

/// Opens raffle `idx` and bumps the raffle counter.
///
/// # Arguments
/// * `ctx` - Context holding the CreateRaffle accounts
/// * `idx` - Must equal the current raffle counter
/// * `total_supply` - Number of tickets on sale
/// * `price` - Price of one ticket in base units of the payment mint
/// * `start_time` - UNIX timestamp the sale opens
/// * `end_time` - UNIX timestamp the sale closes
pub fn process_create_raffle(
    ctx: Context<CreateRaffle>,
    idx: u32,
    total_supply: u32,
    price: u64,
    start_time: i64,
    end_time: i64,
) -> Result<()> {
    Raffle::validate_terms(total_supply, start_time, end_time)?;
    ctx.accounts.global_config.claim_raffle_idx(idx)?;

    let raffle = &mut ctx.accounts.raffle;
    raffle.idx = idx;
    raffle.creator = ctx.accounts.creator.key();
    raffle.payment_mint = ctx.accounts.payment_mint.key();
    raffle.prize_mint = Pubkey::default();
    raffle.prize_kind = PrizeKind::Standard;
    raffle.price = price;
    raffle.total_supply = total_supply;
    raffle.total_sold = 0;
    raffle.winner_idx = 0;
    raffle.start_time = start_time;
    raffle.end_time = end_time;
    raffle.is_deposited = false;
    raffle.is_claimed = false;
    raffle.is_withdrawn = false;
    raffle.bump = ctx.bumps.raffle;
    raffle.escrow_bump = ctx.bumps.escrow;
    raffle.tickets = Vec::new();

    if raffle.is_native_payment() {
        // keep the escrow rent-exempt from the first ticket on
        let reserve = Rent::get()?
            .minimum_balance(0)
            .saturating_sub(ctx.accounts.escrow.lamports());
        if reserve > 0 {
            transfer_sol_from_signer(
                &ctx.accounts.creator,
                &ctx.accounts.escrow.to_account_info(),
                &ctx.accounts.system_program,
                reserve,
            )?;
        }
    } else {
        let escrow_token_account = ctx
            .accounts
            .escrow_token_account
            .as_ref()
            .ok_or(RaffleError::UninitializedAccount)?;
        create_ata(
            &ctx.accounts.creator.to_account_info(),
            &escrow_token_account.to_account_info(),
            &ctx.accounts.escrow.to_account_info(),
            &ctx.accounts.payment_mint.to_account_info(),
            &ctx.accounts.system_program.to_account_info(),
            &ctx.accounts.token_program.to_account_info(),
            &ctx.accounts.associated_token_program,
        )?;
    }

    msg!(
        "Raffle {} created, {} tickets at {} from {} to {}",
        idx,
        total_supply,
        price,
        start_time,
        end_time
    );
    emit!(RaffleCreated {
        raffle_idx: idx,
        creator: raffle.creator,
        payment_mint: raffle.payment_mint,
        price,
        total_supply,
        start_time,
        end_time,
    });

    Ok(())
}
