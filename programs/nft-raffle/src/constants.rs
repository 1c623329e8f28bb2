use anchor_lang::prelude::*;

#[constant]
pub const CONFIG_SEED: &[u8] = b"config";
#[constant]
pub const RAFFLE_SEED: &[u8] = b"raffle";
#[constant]
pub const ESCROW_SEED: &[u8] = b"escrow";
#[constant]
pub const USER_SEED: &[u8] = b"user";

/// Metaplex metadata PDA prefix.
pub const METADATA_SEED: &[u8] = b"metadata";

pub const BASIS_POINTS: u64 = 10_000;
pub const FEE_BPS: u64 = 100; // 1% of every sale goes to the fee destination
pub const MAX_WALLET_BPS: u64 = 4_000; // a single buyer id may hold at most 40% of the supply

/// Length of the opaque buyer id supplied by the off-chain identity system.
pub const UID_LENGTH: usize = 12;

pub const MAX_COLLECTIONS: usize = 10;

/// The raffle account embeds its ticket list, so the supply is capped to keep
/// the account under the 10 KiB allocation limit of a single instruction.
pub const MAX_TICKET_SUPPLY: u32 = 800;
