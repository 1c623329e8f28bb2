use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar;

use crate::constants::{CONFIG_SEED, RAFFLE_SEED};
use crate::entropy::SlotHashEntropy;
use crate::error::RaffleError;
use crate::events::WinnerRevealed;
use crate::state::{GlobalConfig, Raffle};

/// Accounts required to draw a raffle winner.
///
/// Only the platform authority may draw, never the raffle creator.
#[derive(Accounts)]
#[instruction(idx: u32)]
pub struct RevealWinner<'info> {
    pub authority: Signer<'info>,

    #[account(
        seeds = [CONFIG_SEED],
        bump = global_config.bump,
        constraint = global_config.authority == authority.key() @ RaffleError::Unauthorized
    )]
    pub global_config: Box<Account<'info, GlobalConfig>>,

    #[account(
        mut,
        seeds = [RAFFLE_SEED, idx.to_le_bytes().as_ref()],
        bump = raffle.bump
    )]
    pub raffle: Box<Account<'info, Raffle>>,

    /// CHECK: slot hashes sysvar, read raw
    #[account(address = sysvar::slot_hashes::ID)]
    pub slot_hashes: UncheckedAccount<'info>,
}

/// Draws the winning ticket of raffle `idx` once its sale has ended.
///
/// # Arguments
/// * `ctx` - Context containing RevealWinner accounts
/// * `idx` - Index of the raffle
pub fn process_reveal_winner(ctx: Context<RevealWinner>, idx: u32) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let entropy = SlotHashEntropy::new(&ctx.accounts.slot_hashes);

    let raffle = &mut ctx.accounts.raffle;
    let winner_idx = raffle.reveal_winner(now, &entropy)?;
    let uid = raffle.winning_uid()?;

    msg!(
        "Raffle {}: ticket {} of {} wins",
        idx,
        winner_idx,
        raffle.total_sold
    );
    emit!(WinnerRevealed {
        raffle_idx: idx,
        winner_idx,
        uid,
    });

    Ok(())
}
