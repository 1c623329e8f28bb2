#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

/// Seeds, fee rates and capacity limits.
pub mod constants;

/// Prize metadata checks and programmable NFT lock/release.
pub mod custody;

/// Winner-draw entropy sources.
pub mod entropy;

/// Custom error types returned by every instruction.
pub mod error;

/// Events emitted for indexers.
pub mod events;

/// SOL, token and associated token account CPI helpers.
pub mod helpers;

/// Instruction handlers and their account contexts.
pub mod instructions;

/// On-chain records: the platform config, raffles and per-buyer tickets.
pub mod state;

/// Fee and cap arithmetic.
pub mod utils;

#[cfg(test)]
mod test_utils;

use constants::UID_LENGTH;
pub use instructions::*;

declare_id!("C97U9NtqKdwX3GL5fgWHJAJMhbNKkho7zSrweoe7aky7");

#[program]
pub mod nft_raffle {
    use super::*;

    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        process_initialize(ctx)
    }

    pub fn update_settings(
        ctx: Context<UpdateConfig>,
        new_authority: Pubkey,
        fee_destination: Pubkey,
    ) -> Result<()> {
        process_update_settings(ctx, new_authority, fee_destination)
    }

    pub fn add_whitelist(ctx: Context<UpdateConfig>, collection: Pubkey) -> Result<()> {
        process_add_whitelist(ctx, collection)
    }

    pub fn remove_whitelist(ctx: Context<UpdateConfig>, collection: Pubkey) -> Result<()> {
        process_remove_whitelist(ctx, collection)
    }

    pub fn create_raffle(
        ctx: Context<CreateRaffle>,
        idx: u32,
        total_supply: u32,
        price: u64,
        start_time: i64,
        end_time: i64,
    ) -> Result<()> {
        process_create_raffle(ctx, idx, total_supply, price, start_time, end_time)
    }

    pub fn deposit_prize(ctx: Context<DepositPrize>, idx: u32) -> Result<()> {
        process_deposit_prize(ctx, idx)
    }

    pub fn deposit_prize_pnft(ctx: Context<DepositPrizePnft>, idx: u32) -> Result<()> {
        process_deposit_prize_pnft(ctx, idx)
    }

    pub fn buy_ticket(
        ctx: Context<BuyTicket>,
        idx: u32,
        uid: [u8; UID_LENGTH],
        amount: u32,
    ) -> Result<()> {
        process_buy_ticket(ctx, idx, uid, amount)
    }

    pub fn withdraw_funds(ctx: Context<WithdrawFunds>, idx: u32) -> Result<()> {
        process_withdraw_funds(ctx, idx)
    }

    pub fn reveal_winner(ctx: Context<RevealWinner>, idx: u32) -> Result<()> {
        process_reveal_winner(ctx, idx)
    }

    pub fn claim_prize(ctx: Context<ClaimPrize>, idx: u32, uid: [u8; UID_LENGTH]) -> Result<()> {
        process_claim_prize(ctx, idx, uid)
    }

    pub fn claim_prize_pnft(
        ctx: Context<ClaimPrizePnft>,
        idx: u32,
        uid: [u8; UID_LENGTH],
    ) -> Result<()> {
        process_claim_prize_pnft(ctx, idx, uid)
    }
}
