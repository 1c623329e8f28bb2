use anchor_lang::prelude::*;

use crate::constants::UID_LENGTH;
use crate::state::PrizeKind;

#[event]
#[derive(Debug)]
pub struct RaffleCreated {
    pub raffle_idx: u32,
    pub creator: Pubkey,
    pub payment_mint: Pubkey,
    pub price: u64,
    pub total_supply: u32,
    pub start_time: i64,
    pub end_time: i64,
}

#[event]
#[derive(Debug)]
pub struct PrizeDeposited {
    pub raffle_idx: u32,
    pub prize_mint: Pubkey,
    pub prize_kind: PrizeKind,
}

#[event]
#[derive(Debug)]
pub struct TicketPurchased {
    pub raffle_idx: u32,
    pub buyer: Pubkey,
    pub uid: [u8; UID_LENGTH],
    pub amount: u32,
    pub fee: u64,
    pub escrowed: u64,
    pub total_sold: u32,
}

#[event]
#[derive(Debug)]
pub struct WinnerRevealed {
    pub raffle_idx: u32,
    pub winner_idx: u32,
    pub uid: [u8; UID_LENGTH],
}

#[event]
#[derive(Debug)]
pub struct PrizeClaimed {
    pub raffle_idx: u32,
    pub winner: Pubkey,
    pub prize_mint: Pubkey,
}

#[event]
#[derive(Debug)]
pub struct FundsWithdrawn {
    pub raffle_idx: u32,
    pub creator: Pubkey,
    pub amount: u64,
}
