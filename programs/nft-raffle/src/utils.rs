use anchor_lang::prelude::*;

use crate::constants::{BASIS_POINTS, FEE_BPS, MAX_WALLET_BPS};
use crate::error::RaffleError;

/// How one purchase is divided between the platform and the raffle escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentSplit {
    pub total_cost: u64,
    pub fee: u64,
    pub escrowed: u64,
}

pub fn get_bps_amount(amount: u64, bps: u64) -> Result<u64> {
    let product = amount
        .checked_mul(bps)
        .ok_or(RaffleError::NumericOverflow)?;
    product
        .checked_div(BASIS_POINTS)
        .ok_or(error!(RaffleError::NumericOverflow))
}

pub fn split_payment(price: u64, amount: u32) -> Result<PaymentSplit> {
    let total_cost = price
        .checked_mul(amount as u64)
        .ok_or(RaffleError::NumericOverflow)?;
    let fee = get_bps_amount(total_cost, FEE_BPS)?;
    let escrowed = total_cost
        .checked_sub(fee)
        .ok_or(RaffleError::NumericOverflow)?;

    Ok(PaymentSplit {
        total_cost,
        fee,
        escrowed,
    })
}

/// Most tickets a single buyer id may hold: floor(total_supply * 40%).
pub fn wallet_limit(total_supply: u32) -> Result<u32> {
    let limit = get_bps_amount(total_supply as u64, MAX_WALLET_BPS)?;
    u32::try_from(limit).map_err(|_| error!(RaffleError::NumericOverflow))
}
